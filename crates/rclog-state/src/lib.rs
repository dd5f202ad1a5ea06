//! # rclog State
//!
//! Checkpoint persistence between runs. A run reads the stored checkpoint for
//! its log kind once at start and writes the new one once at the end, and only
//! when at least one new entry was retrieved.
//!
//! ## Key Types
//!
//! - [`StateStore`] - The async trait for loading and saving state
//! - [`FileStateStore`] - JSON state file on disk
//! - [`MemoryStateStore`] - In-memory state for tests
//! - [`CheckpointState`] - Map from log kind to last delivered id
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rclog_core::{SystemId, SystemLogEntry};
//! use rclog_state::{FileStateStore, StateStore};
//!
//! async fn example() -> rclog_state::Result<()> {
//!     let store = FileStateStore::new(".rc-log-fetch-state.json");
//!     let mut state = store.load().await?;
//!
//!     let start = state.get::<SystemLogEntry>()?.unwrap_or_default();
//!     // ... fetch entries newer than `start` ...
//!     state.set::<SystemLogEntry>(&SystemId(start.get() + 10))?;
//!     store.save(&state).await
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Missing is empty**: a state file that does not exist loads as empty state
//! - **Atomic replace**: saves go to a sibling file which is renamed into place
//! - **Typed access**: values are decoded as the kind's own identifier type

pub mod error;
pub mod file;
pub mod memory;
pub mod state;
pub mod traits;

pub use error::{Result, StateError};
pub use file::{FileStateStore, DEFAULT_STATE_FILE};
pub use memory::MemoryStateStore;
pub use state::CheckpointState;
pub use traits::StateStore;
