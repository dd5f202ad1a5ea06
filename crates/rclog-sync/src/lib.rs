//! # rclog Sync
//!
//! Incremental retrieval of audit log entries from the cloud API.
//!
//! ## Overview
//!
//! A [`SyncSession`] drives a [`PageTransport`] one page at a time, newest
//! entries first, and folds every page into a [`rclog_core::RecordStore`]
//! until the stored checkpoint shows up or the API runs out of entries.
//!
//! ## Key Properties
//!
//! - **Sequential**: at most one request is outstanding at any time
//! - **Gap-free**: every entry newer than the checkpoint is accumulated
//! - **Duplicate-free**: overlap between consecutive pages is removed
//! - **All or nothing**: any failure aborts the run without a new checkpoint
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rclog_core::{SystemId, SystemLogs};
//! use rclog_sync::{ApiConfig, HttpTransport, SyncConfig, SyncSession};
//!
//! async fn example() -> rclog_sync::Result<()> {
//!     let transport = HttpTransport::new(ApiConfig::new("key", "secret"))?;
//!     let session = SyncSession::new(transport, SyncConfig::default());
//!
//!     let mut store = SystemLogs::new(SystemId(4500));
//!     let report = session.run(&mut store).await?;
//!     println!("{} new entries in {} pages", report.entries_new, report.pages_fetched);
//!     Ok(())
//! }
//! ```
//!
//! ## Run Flow
//!
//! ```text
//!   offset = 0
//!     |
//!     v
//!   fetch_page(offset, limit) --error--> abort
//!     |
//!   filter against checkpoint
//!     |
//!   merge into accumulator
//!     |
//!   found or empty? --yes--> done
//!     |no
//!   offset += limit, repeat
//! ```

pub mod error;
pub mod http;
pub mod page;
pub mod session;
pub mod transport;

pub use error::{Result, SyncError};
pub use http::{ApiConfig, HttpTransport, DEFAULT_BASE_URL};
pub use page::decode_page;
pub use session::{SyncConfig, SyncReport, SyncSession, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use transport::{memory::MemoryTransport, PageRequest, PageTransport};
