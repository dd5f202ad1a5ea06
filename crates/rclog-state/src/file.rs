//! File-backed implementation of the StateStore trait.
//!
//! The state is a small JSON object. Saves write a sibling temporary file and
//! rename it over the target, so a crash leaves either the old state or the
//! new one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, StateError};
use crate::state::CheckpointState;
use crate::traits::StateStore;

/// State file used when none is configured.
pub const DEFAULT_STATE_FILE: &str = ".rc-log-fetch-state.json";

/// JSON state file on disk.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Use the state file at `path`. Nothing is touched until `load`/`save`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StateError {
        StateError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileStateStore {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_FILE)
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self) -> Result<CheckpointState> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file, starting fresh");
                return Ok(CheckpointState::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        // Blank file: no state yet.
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(CheckpointState::default());
        }

        let state = serde_json::from_slice(&content).map_err(|source| StateError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "loaded state file");
        Ok(state)
    }

    async fn save(&self, state: &CheckpointState) -> Result<()> {
        let mut content = serde_json::to_vec_pretty(state)?;
        content.push(b'\n');

        let temp = self.temp_path();
        tokio::fs::write(&temp, &content)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), "saved state file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rclog_core::{SessionId, SessionLogEntry, SystemId, SystemLogEntry};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("state.json"));
        let state = store.load().await.unwrap();
        assert!(state.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let store = FileStateStore::new(&path);

        let mut state = CheckpointState::new();
        state.set::<SystemLogEntry>(&SystemId(77)).unwrap();
        state.set::<SessionLogEntry>(&SessionId::new("s-1")).unwrap();
        store.save(&state).await.unwrap();

        let reopened = FileStateStore::new(&path);
        let loaded = reopened.load().await.unwrap();
        assert_eq!(loaded.get::<SystemLogEntry>().unwrap(), Some(SystemId(77)));
        assert_eq!(
            loaded.get::<SessionLogEntry>().unwrap(),
            Some(SessionId::new("s-1"))
        );
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_empty_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "\n").unwrap();

        let state = FileStateStore::new(&path).load().await.unwrap();
        assert!(state.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "id: 12\n").unwrap();

        let result = FileStateStore::new(&path).load().await;
        assert!(matches!(result, Err(StateError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_unwritable_location_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("missing-dir").join("state.json"));

        let result = store.save(&CheckpointState::new()).await;
        assert!(matches!(result, Err(StateError::Io { .. })));
    }
}
