//! Test fixtures and helpers.
//!
//! Common setup code for unit and integration tests. Every entry gets a
//! timestamp derived from its position so results are reproducible.

use chrono::{DateTime, TimeZone, Utc};
use rclog_core::{SessionId, SessionLogEntry, SystemId, SystemLogEntry};
use rclog_state::{CheckpointState, MemoryStateStore};
use uuid::Uuid;

/// Seconds since the epoch that fixture timestamps count from.
pub const BASE_TIME: i64 = 1_700_000_000;

/// Fixture timestamp `secs` seconds after [`BASE_TIME`].
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(BASE_TIME + secs, 0)
        .single()
        .unwrap_or_default()
}

/// A system entry whose time increases with its id.
pub fn system_entry(id: u64) -> SystemLogEntry {
    SystemLogEntry {
        id: SystemId(id),
        time: at(i64::try_from(id).unwrap_or_default()),
        originator: "Jane Doe".into(),
        api_key_name: String::new(),
        resource: format!("subscription/{}", id % 7),
        kind: "Subscription".into(),
        description: format!("Subscription updated ({id})"),
    }
}

/// A session entry with the given id, `secs` after [`BASE_TIME`].
pub fn session_entry(id: &str, secs: i64) -> SessionLogEntry {
    SessionLogEntry {
        id: SessionId::new(id),
        time: at(secs),
        user: "jane@example.com".into(),
        user_agent: "Mozilla/5.0 (X11; Linux x86_64)".into(),
        ip_address: "203.0.113.7".into(),
        user_role: "Owner".into(),
        kind: "Web".into(),
        action: "Login".into(),
    }
}

/// System entries for `ids`, newest first as the API returns them.
pub fn system_log(ids: impl IntoIterator<Item = u64>) -> Vec<SystemLogEntry> {
    let mut entries: Vec<_> = ids.into_iter().map(system_entry).collect();
    entries.sort_by(|a, b| b.id.cmp(&a.id));
    entries
}

/// `count` session entries with random UUID ids, newest first.
///
/// The newest entry is `count` seconds after [`BASE_TIME`], the oldest one
/// second after it.
pub fn session_log(count: usize) -> Vec<SessionLogEntry> {
    (0..count)
        .map(|i| {
            let secs = i64::try_from(count - i).unwrap_or(i64::MAX / 2);
            session_entry(&Uuid::new_v4().to_string(), secs)
        })
        .collect()
}

/// A state store holding the given checkpoints.
pub fn state_with(system: Option<u64>, session: Option<&str>) -> MemoryStateStore {
    let mut state = CheckpointState::new();
    if let Some(id) = system {
        state
            .set::<SystemLogEntry>(&SystemId(id))
            .expect("plain id serializes");
    }
    if let Some(id) = session {
        state
            .set::<SessionLogEntry>(&SessionId::new(id))
            .expect("plain id serializes");
    }
    MemoryStateStore::with_state(state)
}
