//! StateStore trait: the abstract interface for checkpoint persistence.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::CheckpointState;

/// Durable storage for [`CheckpointState`].
///
/// `load` is called once before a run and `save` at most once after it.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the stored state.
    ///
    /// Absence of prior state is not an error; implementations return
    /// [`CheckpointState::default`] instead.
    async fn load(&self) -> Result<CheckpointState>;

    /// Replace the stored state.
    async fn save(&self, state: &CheckpointState) -> Result<()>;
}

#[async_trait]
impl<S: StateStore + ?Sized> StateStore for std::sync::Arc<S> {
    async fn load(&self) -> Result<CheckpointState> {
        (**self).load().await
    }

    async fn save(&self, state: &CheckpointState) -> Result<()> {
        (**self).save(state).await
    }
}
