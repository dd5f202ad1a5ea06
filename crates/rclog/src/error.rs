//! Error types for a fetch run.

use rclog_core::CoreError;
use rclog_state::StateError;
use rclog_sync::SyncError;
use thiserror::Error;

/// Errors that can occur during a fetch run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Retrieval failed; nothing was written or persisted.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// The state file could not be read.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Encoding the output or parsing an identifier failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Output was written but the new checkpoint was not saved.
    #[error("failed to save checkpoint {checkpoint}: {source}")]
    Persist {
        checkpoint: String,
        #[source]
        source: StateError,
    },
}

impl FetchError {
    /// The API rejected the credentials.
    pub fn is_credential(&self) -> bool {
        matches!(self, FetchError::Sync(e) if e.is_credential())
    }
}

/// Result type for fetch runs.
pub type Result<T> = std::result::Result<T, FetchError>;
