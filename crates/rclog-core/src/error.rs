//! Error types for rclog Core.

use thiserror::Error;

use crate::entry::LogKind;

/// Errors raised while encoding entries or parsing core values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("json encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv encoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid {kind} log identifier {value:?}: {reason}")]
    InvalidIdentifier {
        kind: LogKind,
        value: String,
        reason: String,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
