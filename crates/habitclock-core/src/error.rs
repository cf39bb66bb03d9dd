//! Core error types for habitclock-core.
//!
//! Nothing in the core is fatal to the process. Persistence failures are
//! reported and logged while the in-memory state stays authoritative;
//! validation failures are rejected at the boundary before they reach any
//! store or engine.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitclock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Flat-file persistence errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Failure to read or write one of the record files.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    pub fn path(&self) -> &PathBuf {
        match self {
            PersistenceError::ReadFailed { path, .. } | PersistenceError::WriteFailed { path, .. } => {
                path
            }
        }
    }
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Habit name is empty after trimming
    #[error("Habit name must not be empty")]
    EmptyName,

    /// Habit name would break the one-record-per-line file format
    #[error("Habit name must not contain line breaks")]
    LineBreakInName,

    /// Numeric value outside its accepted range
    #[error("Invalid value for '{field}': {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// No habit carries the given name
    #[error("No habit named '{0}'")]
    HabitNotFound(String),
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

    /// Key does not name a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// A line in a record file that could not be decoded.
///
/// Not an error: the loaders skip such lines and keep going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based line number within the file.
    pub line: usize,
    pub reason: &'static str,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
