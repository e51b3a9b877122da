//! CLI argument parsing and top-level dispatch.
//!
//! - `args` - Command-line argument structures
//! - `handlers` - Builds the command map and runs the requested mode

pub mod args;
pub mod handlers;

pub use args::{Cli, LogLevel};
pub use handlers::run;
