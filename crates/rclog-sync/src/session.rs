//! The synchronization loop.
//!
//! Fetches newest-first pages at increasing offsets and folds them into a
//! record store until the checkpoint is located or a page comes back empty.

use rclog_core::{LogEntry, RecordStore};
use tracing::{debug, info, warn};

use crate::error::{Result, SyncError};
use crate::transport::PageTransport;

/// Page size used when none (or zero) is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page the API serves.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Configuration for the loop.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Entries requested per page; also the offset step.
    pub page_size: u32,
}

impl SyncConfig {
    /// Validated configuration.
    ///
    /// Zero falls back to [`DEFAULT_PAGE_SIZE`]; anything above
    /// [`MAX_PAGE_SIZE`] is rejected.
    pub fn new(page_size: u32) -> Result<Self> {
        if page_size > MAX_PAGE_SIZE {
            return Err(SyncError::InvalidConfig(format!(
                "page size cannot be greater than {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        if page_size == 0 {
            warn!(page_size = DEFAULT_PAGE_SIZE, "page size is 0, using default");
            return Ok(Self::default());
        }
        Ok(Self { page_size })
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of page requests issued.
    pub pages_fetched: usize,
    /// Entries received across all pages, before filtering.
    pub entries_fetched: usize,
    /// Entries in the accumulator after the run.
    pub entries_new: usize,
    /// The checkpoint boundary was located.
    pub checkpoint_found: bool,
    /// The run stopped on an empty page.
    pub exhausted: bool,
}

/// Drives a transport against one record store.
pub struct SyncSession<T: PageTransport> {
    transport: T,
    config: SyncConfig,
}

impl<T: PageTransport> SyncSession<T> {
    /// Create a new session.
    pub fn new(transport: T, config: SyncConfig) -> Self {
        Self { transport, config }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Fetch every entry newer than the store's checkpoint into the store.
    ///
    /// On error the store may hold a partial accumulator. Callers discard it
    /// and must not persist a checkpoint from it.
    pub async fn run<E: LogEntry>(&self, store: &mut RecordStore<E>) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        let limit = self.config.page_size;
        let mut offset: u64 = 0;

        loop {
            let page = self.transport.fetch_page::<E>(offset, limit).await?;
            report.pages_fetched += 1;
            report.entries_fetched += page.len();

            let received = page.len();
            let filtered = store.filter(page);
            let kept = filtered.entries.len();
            debug!(
                kind = %E::KIND,
                offset,
                received,
                kept,
                found = filtered.found,
                "page"
            );

            store.merge(filtered.entries);

            if filtered.found {
                report.checkpoint_found = true;
                break;
            }
            if kept == 0 {
                report.exhausted = true;
                break;
            }
            offset += u64::from(limit);
        }

        report.entries_new = store.len();
        info!(
            kind = %E::KIND,
            pages = report.pages_fetched,
            new_entries = report.entries_new,
            checkpoint = %store.checkpoint(),
            "sync complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::memory::MemoryTransport;
    use crate::transport::PageRequest;
    use chrono::{TimeZone, Utc};
    use rclog_core::{SessionId, SessionLogEntry, SessionLogs, SystemId, SystemLogEntry, SystemLogs};

    fn sys(id: u64) -> SystemLogEntry {
        SystemLogEntry {
            id: SystemId(id),
            time: Utc.timestamp_opt(1_700_000_000 + id as i64, 0).unwrap(),
            originator: "ops".into(),
            api_key_name: String::new(),
            resource: String::new(),
            kind: String::new(),
            description: format!("entry {id}"),
        }
    }

    fn sess(id: &str, secs: i64) -> SessionLogEntry {
        SessionLogEntry {
            id: SessionId::new(id),
            time: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
            user: "jane@example.com".into(),
            user_agent: "Mozilla/5.0".into(),
            ip_address: "10.0.0.1".into(),
            user_role: "Owner".into(),
            kind: "Web".into(),
            action: "Login".into(),
        }
    }

    fn sys_all(ids: impl IntoIterator<Item = u64>) -> Vec<SystemLogEntry> {
        ids.into_iter().map(sys).collect()
    }

    fn ids(store: &SystemLogs) -> Vec<u64> {
        store.entries().iter().map(|e| e.id.0).collect()
    }

    fn config(page_size: u32) -> SyncConfig {
        SyncConfig::new(page_size).unwrap()
    }

    #[test]
    fn test_config_limits() {
        assert_eq!(config(0).page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config(1000).page_size, 1000);
        assert!(matches!(
            SyncConfig::new(1001),
            Err(SyncError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_stops_when_checkpoint_found() {
        let transport = MemoryTransport::scripted().with_page(&sys_all([9, 8, 7, 6, 5, 4]));
        let session = SyncSession::new(transport, config(6));
        let mut store = SystemLogs::new(SystemId(5));

        let report = session.run(&mut store).await.unwrap();

        assert_eq!(ids(&store), vec![9, 8, 7, 6]);
        assert!(report.checkpoint_found);
        assert_eq!(report.pages_fetched, 1);
        assert_eq!(store.checkpoint(), SystemId(9));
    }

    #[tokio::test]
    async fn test_pages_until_exhausted() {
        let transport = MemoryTransport::remote(&sys_all([12, 11, 10, 9, 8, 7]));
        let session = SyncSession::new(transport, config(3));
        let mut store = SystemLogs::new(SystemId(0));

        let report = session.run(&mut store).await.unwrap();

        assert_eq!(ids(&store), vec![12, 11, 10, 9, 8, 7]);
        assert!(report.exhausted);
        assert!(!report.checkpoint_found);
        assert_eq!(report.pages_fetched, 3);
        assert_eq!(
            session.transport().requests(),
            vec![
                PageRequest { offset: 0, limit: 3 },
                PageRequest { offset: 3, limit: 3 },
                PageRequest { offset: 6, limit: 3 },
            ]
        );
        assert_eq!(store.checkpoint(), SystemId(12));
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let session = SyncSession::new(MemoryTransport::scripted(), config(50));
        let mut store = SystemLogs::new(SystemId(40));

        let report = session.run(&mut store).await.unwrap();

        assert!(store.is_empty());
        assert!(report.exhausted);
        assert_eq!(report.pages_fetched, 1);
        assert_eq!(store.checkpoint(), SystemId(40));
    }

    #[tokio::test]
    async fn test_overlap_from_concurrent_writes_is_removed() {
        // Two entries land on the server after the first page was served.
        let transport = MemoryTransport::remote(&sys_all((1..=10).rev()))
            .insert_after(1, &sys_all([12, 11]));
        let session = SyncSession::new(transport, config(4));
        let mut store = SystemLogs::new(SystemId(2));

        session.run(&mut store).await.unwrap();

        assert_eq!(ids(&store), vec![10, 9, 8, 7, 6, 5, 4, 3]);
        assert_eq!(store.checkpoint(), SystemId(10));
    }

    #[tokio::test]
    async fn test_session_log_exact_match() {
        let page = vec![sess("xyz-9", 3), sess("abc-123", 2), sess("def-4", 1)];
        let transport = MemoryTransport::scripted().with_page(&page);
        let session = SyncSession::new(transport, config(3));
        let mut store = SessionLogs::new(SessionId::new("abc-123"));

        let report = session.run(&mut store).await.unwrap();

        assert!(report.checkpoint_found);
        assert_eq!(store.len(), 1);
        assert_eq!(store.checkpoint(), SessionId::new("xyz-9"));
    }

    #[tokio::test]
    async fn test_error_mid_run_is_returned() {
        let transport = MemoryTransport::scripted()
            .with_page(&sys_all([6, 5, 4]))
            .with_failure(SyncError::Transport("connection reset".into()));
        let session = SyncSession::new(transport, config(3));
        let mut store = SystemLogs::new(SystemId(0));

        let err = session.run(&mut store).await.unwrap_err();
        assert!(matches!(err, SyncError::Transport(_)));
    }

    #[tokio::test]
    async fn test_decode_error_aborts() {
        let transport = MemoryTransport::scripted().with_body("not json");
        let session = SyncSession::new(transport, config(3));
        let mut store = SystemLogs::default();

        let err = session.run(&mut store).await.unwrap_err();
        assert!(matches!(err, SyncError::Decode(_)));
    }

    #[tokio::test]
    async fn test_run_is_idempotent() {
        let log = sys_all((1..=25).rev());
        let first = SyncSession::new(MemoryTransport::remote(&log), config(7));
        let second = SyncSession::new(MemoryTransport::remote(&log), config(7));

        let mut a = SystemLogs::new(SystemId(11));
        let mut b = SystemLogs::new(SystemId(11));
        first.run(&mut a).await.unwrap();
        second.run(&mut b).await.unwrap();

        assert_eq!(a.entries(), b.entries());
        assert_eq!(ids(&a), (12..=25).rev().collect::<Vec<_>>());
    }
}
