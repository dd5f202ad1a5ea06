//! The persisted checkpoint record.

use std::collections::BTreeMap;

use rclog_core::LogEntry;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StateError};

/// Last delivered identifier per log kind.
///
/// Stored as a flat JSON object keyed by [`rclog_core::LogKind::state_key`],
/// e.g. `{ "session": "abc-123", "system": 4567 }`. Keys this version does
/// not know are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckpointState {
    values: BTreeMap<String, Value>,
}

impl CheckpointState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored checkpoint for `E`'s log kind, if any.
    pub fn get<E: LogEntry>(&self) -> Result<Option<E::Id>> {
        let key = E::KIND.state_key();
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| StateError::InvalidData {
                    key,
                    reason: format!("{value} ({e})"),
                }),
        }
    }

    /// Record `id` as the checkpoint for `E`'s log kind.
    pub fn set<E: LogEntry>(&mut self, id: &E::Id) -> Result<()> {
        let value = serde_json::to_value(id)?;
        self.values.insert(E::KIND.state_key().to_string(), value);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
