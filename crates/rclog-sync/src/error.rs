//! Error types for the sync module.

use thiserror::Error;

/// Errors that can end a retrieval run.
///
/// None of these are retried; each one is terminal for the run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The API rejected the credentials (HTTP 401 or 403).
    #[error("{reason}: check your API key and secret key (HTTP {status})")]
    Credential { status: u16, reason: &'static str },

    /// Any other non-200 response.
    #[error("unexpected status code {status} from API")]
    UnexpectedStatus { status: u16 },

    /// The response body is not a page of entries.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request could not be completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration rejected before any request was made.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SyncError {
    /// Whether this error means the credentials need attention.
    pub fn is_credential(&self) -> bool {
        matches!(self, SyncError::Credential { .. })
    }
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
