//! # rc-log-fetch Testkit
//!
//! Testing utilities for rc-log-fetch.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Deterministic entries, remote logs and pre-seeded state
//! - **Generators**: Proptest strategies for property-based testing
//! - **Samples**: Response bodies shaped like the real API
//!
//! ## Test Fixtures
//!
//! ```rust
//! use rclog_testkit::fixtures::{state_with, system_log};
//! use rclog_sync::MemoryTransport;
//!
//! // Remote log of ids 10..1, newest first, with a checkpoint at 4.
//! let transport = MemoryTransport::remote(&system_log(1..=10));
//! let state = state_with(Some(4), None);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use rclog_testkit::generators::system_log;
//!
//! proptest! {
//!     #[test]
//!     fn logs_are_newest_first(log in system_log(50)) {
//!         prop_assert!(log.windows(2).all(|w| w[0].id > w[1].id));
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod samples;

pub use fixtures::{session_entry, session_log, state_with, system_entry, system_log};
