//! Analysis Orchestrator: one AI call that classifies source content and
//! ranks publishing platforms, with a deterministic local fallback.

pub mod analyzer;
pub mod fallback;
pub mod models;
pub mod prompts;

pub use analyzer::analyze;
