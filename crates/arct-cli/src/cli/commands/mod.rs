//! CLI command handlers, one per file.

mod config;
mod retrieve;

pub use config::run_config;
pub use retrieve::{run_retrieve, RetrieveArgs};
