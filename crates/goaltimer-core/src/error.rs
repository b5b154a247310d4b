//! Core error types for goaltimer-core.
//!
//! Every fallible operation in the library returns [`CoreError`]. Domain
//! errors (bad input, no selection, a timer already running) are recoverable
//! at the presentation boundary; [`CoreError::user_message`] gives the text
//! to show the user.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for goaltimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Minutes input was not an integer, was negative, or overflowed.
    #[error("Invalid duration '{input}': expected a whole number of minutes")]
    InvalidDuration { input: String },

    /// A row index outside the registry.
    #[error("Index {index} out of range for goal registry (length: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A start request arrived without any row selected.
    #[error("No goal selected")]
    NoSelection,

    /// A session is already running and the conflict policy is `reject`.
    #[error("A timer is already running for goal '{goal}'")]
    SessionAlreadyActive { goal: String },

    /// Argument outside the function's contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Home directory could not be determined
    #[error("Cannot determine a configuration directory")]
    NoDataDir,

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl CoreError {
    /// Message the presentation layer shows for this error.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::InvalidDuration { .. } => {
                "Please enter a valid timer value (numeric).".to_string()
            }
            CoreError::IndexOutOfRange { .. } | CoreError::NoSelection => {
                "Please select a goal from the table.".to_string()
            }
            CoreError::SessionAlreadyActive { goal } => {
                format!("A timer is already running for goal: {goal}")
            }
            other => other.to_string(),
        }
    }

    /// True for errors the user can fix by retrying with different input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidDuration { .. }
                | CoreError::IndexOutOfRange { .. }
                | CoreError::NoSelection
                | CoreError::SessionAlreadyActive { .. }
                | CoreError::InvalidArgument(_)
        )
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
