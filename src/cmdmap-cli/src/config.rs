//! Command table configuration.
//!
//! ```toml
//! prompt = "cmdmap> "
//! prefix = ""
//!
//! [[command]]
//! path = ["deploy", "canary"]
//! action = "echo"
//! args = ["deploying canary"]
//!
//! [[command]]
//! path = ["rollback"]   # no action: reserved, not implemented
//! ```
//!
//! An empty `path` targets the default key of the root level.

use std::path::{Path, PathBuf};

use cmdmap::{Bind, CommandMap, CommandMapError, Handler, Item};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a command table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown action '{name}' for command '{command}'")]
    UnknownAction { name: String, command: String },

    #[error("Invalid command table: {0}")]
    Build(#[from] CommandMapError),
}

/// One registered command path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Tokens leading to the command. Empty means the root default.
    #[serde(default)]
    pub path: Vec<String>,

    /// Builtin action name. Absent means reserved but not implemented.
    #[serde(default)]
    pub action: Option<String>,

    /// Arguments bound ahead of the typed ones.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Prompt shown before each line in interactive mode.
    pub prompt: String,

    /// Prefix for every output line.
    pub prefix: Option<String>,

    /// Registered commands, applied in order.
    #[serde(rename = "command")]
    pub commands: Vec<CommandConfig>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let command = |path: &[&str], action: Option<&str>| CommandConfig {
            path: path.iter().map(|s| s.to_string()).collect(),
            action: action.map(str::to_string),
            args: Vec::new(),
        };
        Self {
            prompt: "cmdmap> ".to_string(),
            prefix: None,
            commands: vec![
                command(&["echo"], Some("echo")),
                command(&["paths"], Some("paths")),
                command(&["quit"], Some("quit")),
                command(&["status"], None),
            ],
        }
    }
}

impl CliConfig {
    /// Load from `path`, or fall back to the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("no command table given, using built-in table");
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded command table");
        Ok(config)
    }

    /// Build the command map, resolving action names through `resolve`.
    pub fn build_map<'a, F>(&self, resolve: F) -> Result<CommandMap<'a>, ConfigError>
    where
        F: Fn(&str) -> Option<&'a Handler<'a>>,
    {
        let mut map = CommandMap::new();
        for command in &self.commands {
            let mut items: Vec<Item<'a>> = if command.path.is_empty() {
                vec![Item::Nil]
            } else {
                command.path.iter().cloned().map(Item::Text).collect()
            };

            match &command.action {
                Some(name) => {
                    let handler = resolve(name).ok_or_else(|| ConfigError::UnknownAction {
                        name: name.clone(),
                        command: command.path.join(" "),
                    })?;
                    items.push(Item::Action(Bind::with_args(handler, command.args.clone())));
                }
                None => items.push(Item::Nil),
            }

            map.extend(items)?;
        }
        tracing::debug!(commands = self.commands.len(), "built command map");
        Ok(map)
    }
}
