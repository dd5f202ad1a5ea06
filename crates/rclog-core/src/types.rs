//! Strong identifier types for the two log kinds.
//!
//! Both identifiers are newtypes so a system checkpoint can never be handed
//! to a session record store, and vice versa.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entry::{LogEntry, LogKind};
use crate::error::{CoreError, Result};

/// Capability shared by every log identifier.
///
/// The only search a record store ever performs is "where does this page
/// stop being new?". Each identifier answers it in the way its ordering
/// guarantees allow.
pub trait Identifier:
    Clone + Eq + Default + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Index of the first entry at or beyond `target`.
    ///
    /// `entries` is newest-first. Returns `entries.len()` when no entry
    /// reaches the target.
    fn boundary<E: LogEntry<Id = Self>>(entries: &[E], target: &Self) -> usize;

    /// Parse an identifier supplied by a user (for example a start override).
    fn parse(value: &str) -> Result<Self>;
}

/// Numeric identifier of a system log entry.
///
/// Assigned by the server in increasing order, so it sorts the same way the
/// entries were produced. `SystemId(0)` precedes every real entry.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SystemId(pub u64);

impl SystemId {
    /// Get the raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Identifier for SystemId {
    fn boundary<E: LogEntry<Id = Self>>(entries: &[E], target: &Self) -> usize {
        // Pages are sorted by descending id, so `id > target` holds for a prefix.
        entries.partition_point(|entry| entry.id() > target)
    }

    fn parse(value: &str) -> Result<Self> {
        value
            .trim()
            .parse::<u64>()
            .map(SystemId)
            .map_err(|e| CoreError::InvalidIdentifier {
                kind: LogKind::System,
                value: value.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Debug for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemId({})", self.0)
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SystemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Opaque identifier of a session log entry.
///
/// These are generated unique strings. They carry no order that matches
/// arrival order, so this type intentionally implements equality only.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Create from anything string-like.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Identifier for SessionId {
    fn boundary<E: LogEntry<Id = Self>>(entries: &[E], target: &Self) -> usize {
        entries
            .iter()
            .position(|entry| entry.id() == target)
            .unwrap_or(entries.len())
    }

    fn parse(value: &str) -> Result<Self> {
        Ok(Self(value.trim().to_string()))
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({:?})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
