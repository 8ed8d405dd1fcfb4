//! CLI command handlers.

pub mod categories;
pub mod completions;
pub mod list;
pub mod owners;
