//! Interactive shell over a [`cmdmap::CommandMap`].
//!
//! - `cli/` - Argument parsing and the top-level run handler
//! - `config` - TOML command table
//! - `builtins` - Actions a command table can refer to by name
//! - `output` - Output sinks: prefixing printer and tee
//! - `repl` - Line source with loopback queue and the read-dispatch loop

pub mod builtins;
pub mod cli;
pub mod config;
pub mod output;
pub mod repl;
