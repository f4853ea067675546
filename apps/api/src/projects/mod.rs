// Projects: creation with analysis and uploads, listing, review edits and
// approval, and per-user analytics.
pub mod files;
pub mod handlers;
pub mod queries;
pub mod stats;
