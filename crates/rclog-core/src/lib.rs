//! # rclog Core
//!
//! Pure primitives for incremental log retrieval: identifiers, log entries,
//! the per-run record store, and the output encoders.
//!
//! This crate performs no networking and no file access. Everything here is
//! computation over pages of entries that some transport already fetched.
//!
//! ## Key Types
//!
//! - [`SystemId`] - Monotonic numeric identifier of a system log entry
//! - [`SessionId`] - Opaque, unordered identifier of a session log entry
//! - [`LogEntry`] - Shared capability of both entry kinds
//! - [`RecordStore`] - Accumulator plus checkpoint for one run
//!
//! ## Identifier Regimes
//!
//! The two log kinds look alike but are not. System ids are totally ordered
//! and match arrival order, so boundaries are found with a binary search.
//! Session ids only support equality, so boundaries are found by scanning.
//! [`SessionId`] has no `Ord` impl, which keeps the fast path out of reach.

pub mod encode;
pub mod entry;
pub mod error;
pub mod record;
pub mod types;

pub use encode::{write_csv, write_json, OutputFormat};
pub use entry::{LogEntry, LogKind, SessionLogEntry, SystemLogEntry};
pub use error::{CoreError, Result};
pub use record::{filter_page, merge_page, Filtered, RecordStore, SessionLogs, SortOrder, SystemLogs};
pub use types::{Identifier, SessionId, SystemId};
