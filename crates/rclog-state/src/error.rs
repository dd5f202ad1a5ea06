//! Error types for the state module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing checkpoint state.
#[derive(Debug, Error)]
pub enum StateError {
    /// I/O error on the state file.
    #[error("I/O error on state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// State file is not valid JSON.
    #[error("state file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value does not have the shape its log kind requires.
    #[error("invalid checkpoint for {key} log: {reason}")]
    InvalidData { key: &'static str, reason: String },

    /// State could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for state operations.
pub type Result<T> = std::result::Result<T, StateError>;
