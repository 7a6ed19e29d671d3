//! CLI command implementations

pub mod completions;
pub mod config;
pub mod import;
pub mod list;
pub mod template;
