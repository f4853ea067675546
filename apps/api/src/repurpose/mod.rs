// Content Repurposing: prompt templates, response normalization, and the
// per-platform generation orchestrator.
pub mod handlers;
pub mod legacy;
pub mod normalizer;
pub mod orchestrator;
pub mod platform;
pub mod prompts;
pub mod store;
