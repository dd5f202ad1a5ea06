//! Log entries as returned by the cloud API.
//!
//! Entries are immutable once received. Field names follow the API's JSON
//! shape, which is also used for the CSV header.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::types::{Identifier, SessionId, SystemId};

/// The two log kinds served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// Account activity log with numeric, increasing ids.
    System,
    /// Console session log with generated string ids.
    Session,
}

impl LogKind {
    /// API resource path for this log.
    pub const fn resource(self) -> &'static str {
        match self {
            LogKind::System => "logs",
            LogKind::Session => "session-logs",
        }
    }

    /// Key under which this log's checkpoint is persisted.
    pub const fn state_key(self) -> &'static str {
        match self {
            LogKind::System => "system",
            LogKind::Session => "session",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.state_key())
    }
}

/// Behaviour shared by system and session entries.
///
/// A record store is generic over this trait. The associated identifier
/// decides which boundary search is legal for the kind.
pub trait LogEntry:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Identifier type for this kind.
    type Id: Identifier;

    /// Which log this entry belongs to.
    const KIND: LogKind;

    /// Column names for tabular output, in record order.
    const CSV_HEADER: &'static [&'static str];

    /// The entry's identifier.
    fn id(&self) -> &Self::Id;

    /// When the entry was produced.
    fn time(&self) -> DateTime<Utc>;

    /// Ascending order used by the final sort.
    fn sort_cmp(&self, other: &Self) -> Ordering;

    /// One CSV row, matching [`LogEntry::CSV_HEADER`].
    fn csv_record(&self) -> Vec<String>;
}

fn is_empty(s: &str) -> bool {
    s.is_empty()
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// An entry of the system log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemLogEntry {
    pub id: SystemId,
    pub time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "is_empty")]
    pub originator: String,
    #[serde(default, skip_serializing_if = "is_empty")]
    pub api_key_name: String,
    #[serde(default, skip_serializing_if = "is_empty")]
    pub resource: String,
    #[serde(rename = "type", default, skip_serializing_if = "is_empty")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

impl LogEntry for SystemLogEntry {
    type Id = SystemId;

    const KIND: LogKind = LogKind::System;

    const CSV_HEADER: &'static [&'static str] = &[
        "id",
        "time",
        "originator",
        "apiKeyName",
        "resource",
        "type",
        "description",
    ];

    fn id(&self) -> &SystemId {
        &self.id
    }

    fn time(&self) -> DateTime<Utc> {
        self.time
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            format_time(&self.time),
            self.originator.clone(),
            self.api_key_name.clone(),
            self.resource.clone(),
            self.kind.clone(),
            self.description.clone(),
        ]
    }
}

/// An entry of the session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLogEntry {
    pub id: SessionId,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub user_role: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub action: String,
}

impl LogEntry for SessionLogEntry {
    type Id = SessionId;

    const KIND: LogKind = LogKind::Session;

    const CSV_HEADER: &'static [&'static str] = &[
        "id",
        "time",
        "user",
        "userAgent",
        "ipAddress",
        "userRole",
        "type",
        "action",
    ];

    fn id(&self) -> &SessionId {
        &self.id
    }

    fn time(&self) -> DateTime<Utc> {
        self.time
    }

    // Session ids have no usable order; time is the only sort key.
    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.time().cmp(&other.time())
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            format_time(&self.time),
            self.user.clone(),
            self.user_agent.clone(),
            self.ip_address.clone(),
            self.user_role.clone(),
            self.kind.clone(),
            self.action.clone(),
        ]
    }
}
