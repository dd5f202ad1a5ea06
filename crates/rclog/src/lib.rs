//! # rc-log-fetch
//!
//! Incremental retrieval of Redis Cloud system and session logs.
//!
//! ## Overview
//!
//! Each run fetches only the entries produced since the previous run:
//!
//! - **Fetch**: pages are requested newest-first at increasing offsets
//! - **Filter**: each page is cut at the stored checkpoint
//! - **Merge**: pages shifted by concurrent writes are de-duplicated
//! - **Emit**: the result is sorted and written as JSON or CSV
//! - **Persist**: the newest identifier becomes the next checkpoint
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rclog::{FetchConfig, Fetcher};
//! use rclog::core::LogKind;
//! use rclog::state::FileStateStore;
//! use rclog::sync::{ApiConfig, HttpTransport};
//!
//! async fn example() -> rclog::Result<()> {
//!     let transport = HttpTransport::new(ApiConfig::new("api-key", "secret-key"))?;
//!     let state = FileStateStore::default();
//!     let fetcher = Fetcher::new(transport, state, FetchConfig::new(LogKind::System));
//!
//!     let report = fetcher.run(std::io::stdout()).await?;
//!     println!("next checkpoint: {}", report.checkpoint);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `rclog::core` - Entries, identifiers, record store and encoders
//! - `rclog::state` - Checkpoint persistence
//! - `rclog::sync` - Page transports and the fetch loop

pub mod error;
pub mod fetcher;

// Re-export component crates
pub use rclog_core as core;
pub use rclog_state as state;
pub use rclog_sync as sync;

pub use error::{FetchError, Result};
pub use fetcher::{FetchConfig, Fetcher, RunReport};

pub use rclog_core::{LogKind, OutputFormat, SortOrder};
