//! CLI argument structures and parsing.

use std::path::PathBuf;

use clap::Parser;

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Abbreviation-tolerant command shell.
///
/// With TOKENS, dispatches them once and exits: 0 when a command ran,
/// 1 when nothing matched, 2 when the command is not implemented,
/// 3 when the action failed.
/// Without TOKENS, reads command lines from standard input.
#[derive(Debug, Parser)]
#[command(name = "cmdmap", version)]
pub struct Cli {
    /// Command table to load (TOML)
    #[arg(long, short = 'f', env = "CMDMAP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level for diagnostics on stderr
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Queue a line to run before reading standard input
    #[arg(long = "command", short = 'c', value_name = "LINE")]
    pub commands: Vec<String>,

    /// Also write all output to this file
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Tokens to dispatch once
    #[arg(trailing_var_arg = true)]
    pub tokens: Vec<String>,
}

impl Cli {
    /// Effective log level: `--verbose`, then `CMDMAP_LOG_LEVEL`, then `--log-level`.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else if let Ok(env_level) = std::env::var("CMDMAP_LOG_LEVEL") {
            LogLevel::from_str_loose(&env_level).unwrap_or(self.log_level)
        } else {
            self.log_level
        }
    }
}
