//! Error types for the command map.

use thiserror::Error;

/// Boxed error returned by leaf actions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for command map operations.
pub type Result<T> = std::result::Result<T, CommandMapError>;

/// Errors raised while building, editing or dispatching a [`CommandMap`](crate::CommandMap).
#[derive(Debug, Error)]
pub enum CommandMapError {
    /// An insertion used something other than a string or the default key.
    #[error("key must be a string or the default key, not {found}")]
    InvalidKeyType { found: &'static str },

    /// A pre-bound argument could not be turned into a string.
    #[error("pre-bound argument must be a string or integer, not {found}")]
    InvalidArgument { found: &'static str },

    /// Deletion probe matched no key (or more than one).
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// Dispatch reached a command that is reserved but has no implementation.
    #[error("command not implemented: {key}")]
    NotImplemented { key: String },

    /// A leaf action failed.
    #[error("action failed: {0}")]
    Action(#[source] BoxError),
}

impl CommandMapError {
    /// The key this error refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::KeyNotFound { key } | Self::NotImplemented { key } => Some(key),
            Self::InvalidKeyType { .. } | Self::InvalidArgument { .. } | Self::Action(_) => None,
        }
    }

    /// Whether dispatch stopped on an explicitly unset command.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}
