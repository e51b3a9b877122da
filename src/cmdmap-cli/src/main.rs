//! cmdmap - abbreviation-tolerant command shell.
//!
//! Dispatches either the tokens given on the command line or every line read
//! from standard input against a command table.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmdmap_cli::cli::{Cli, run};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG, when set, takes precedence over the computed level.
    let level = cli.effective_log_level().as_filter_str();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run(cli)
}
