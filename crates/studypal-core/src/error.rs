//! Core error types for studypal-core.
//!
//! Every error here is local and recoverable. Timer operations that fail
//! their preconditions return a [`TimerError`] and leave the engine
//! untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studypal-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer state machine errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task source errors
    #[error("Task source error: {0}")]
    Task(#[from] TaskSourceError),
}

/// Errors raised by the mode catalog and the timer engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Profile name is not one of the fixed catalog entries.
    #[error("Unknown profile '{0}' (expected BEGINNER, INTERMEDIATE, PRO or CUSTOM)")]
    UnknownProfile(String),

    /// A custom profile value failed validation.
    #[error("Invalid profile value for '{field}': {message}")]
    InvalidProfile {
        field: &'static str,
        message: String,
    },

    /// A work phase was started without a bound task.
    #[error("No task selected: work phases must be attributed to a task")]
    NoTaskSelected,

    /// The requested transition is not allowed from the current state.
    #[error("Cannot {action} while timer is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors returned by [`crate::task::TaskSource`] implementations.
#[derive(Error, Debug)]
pub enum TaskSourceError {
    /// Failed to read the backing store
    #[error("Failed to read tasks from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Task payload could not be decoded
    #[error("Malformed task data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The source has no tasks for this user
    #[error("Unknown user: {0}")]
    UnknownUser(String),
}

impl From<TimerError> for ConfigError {
    fn from(err: TimerError) -> Self {
        match err {
            TimerError::InvalidProfile { field, message } => ConfigError::InvalidValue {
                key: format!("custom.{field}"),
                message,
            },
            TimerError::UnknownProfile(name) => ConfigError::InvalidValue {
                key: "timer.default_profile".into(),
                message: format!("unknown profile '{name}'"),
            },
            other => ConfigError::ParseFailed(other.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
