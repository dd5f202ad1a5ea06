//! In-memory implementation of the StateStore trait.
//!
//! This is primarily for testing. Nothing survives the process.

use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::Result;
use crate::state::CheckpointState;
use crate::traits::StateStore;

/// In-memory state store.
///
/// Counts saves so tests can assert that a run did or did not persist.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: RwLock<CheckpointState>,
    saves: AtomicUsize,
}

impl MemoryStateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `state`.
    pub fn with_state(state: CheckpointState) -> Self {
        Self {
            state: RwLock::new(state),
            saves: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn snapshot(&self) -> CheckpointState {
        self.state.read().unwrap().clone()
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self) -> Result<CheckpointState> {
        Ok(self.state.read().unwrap().clone())
    }

    async fn save(&self, state: &CheckpointState) -> Result<()> {
        *self.state.write().unwrap() = state.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
