//! Proptest generators for property-based testing.

use proptest::prelude::*;
use rclog_core::{LogEntry, SessionLogEntry, SystemLogEntry};
use uuid::Uuid;

use crate::fixtures;

/// Generate a page size small enough to force many pages.
pub fn page_size() -> impl Strategy<Value = u32> {
    1u32..=16
}

/// Generate a newest-first system log of up to `max_len` distinct ids.
pub fn system_log(max_len: usize) -> impl Strategy<Value = Vec<SystemLogEntry>> {
    prop::collection::btree_set(1u64..1_000_000, 0..=max_len)
        .prop_map(|ids| fixtures::system_log(ids))
}

/// Generate a newest-first session log of up to `max_len` entries.
///
/// Ids are random UUIDs, so their lexical order is unrelated to arrival order.
pub fn session_log(max_len: usize) -> impl Strategy<Value = Vec<SessionLogEntry>> {
    prop::collection::hash_set(any::<u128>(), 0..=max_len).prop_map(|raw| {
        let count = raw.len();
        raw.into_iter()
            .enumerate()
            .map(|(i, bits)| {
                let secs = i64::try_from(count - i).unwrap_or_default();
                fixtures::session_entry(&Uuid::from_u128(bits).to_string(), secs)
            })
            .collect()
    })
}

/// A remote log plus how much of it an earlier run already delivered.
#[derive(Debug, Clone)]
pub struct FetchCase<E> {
    /// Full remote log, newest first.
    pub log: Vec<E>,
    /// Number of oldest entries delivered before; their newest is the checkpoint.
    pub known: usize,
    pub page_size: u32,
}

impl<E: LogEntry> FetchCase<E> {
    /// Checkpoint left by the earlier run, if it delivered anything.
    pub fn checkpoint(&self) -> Option<E::Id> {
        let index = self.log.len().checked_sub(self.known)?;
        self.log.get(index).map(|e| e.id().clone())
    }

    /// Entries a correct run must deliver, newest first.
    pub fn expected(&self) -> &[E] {
        &self.log[..self.log.len() - self.known]
    }
}

/// Generate a [`FetchCase`] over logs drawn from `log`.
pub fn fetch_case<E: LogEntry>(
    log: impl Strategy<Value = Vec<E>>,
) -> impl Strategy<Value = FetchCase<E>> {
    log.prop_flat_map(|log| {
        let len = log.len();
        (Just(log), 0..=len, page_size())
    })
    .prop_map(|(log, known, page_size)| FetchCase {
        log,
        known,
        page_size,
    })
}
