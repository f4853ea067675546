pub mod content;
pub mod pagination;
pub mod project;
