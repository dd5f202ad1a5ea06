//! The Fetcher: one incremental run from stored checkpoint to output.
//!
//! Brings together the page transport, the record store and the checkpoint
//! state. A run either completes (output written, checkpoint advanced) or
//! fails before anything is persisted.

use std::io::Write;

use rclog_core::{
    Identifier, LogEntry, LogKind, OutputFormat, RecordStore, SessionLogEntry, SortOrder,
    SystemLogEntry,
};
use rclog_state::StateStore;
use rclog_sync::{PageTransport, SyncConfig, SyncReport, SyncSession};
use tracing::{debug, info};

use crate::error::{FetchError, Result};

/// Configuration for a run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Which log to fetch.
    pub kind: LogKind,
    /// Paging configuration.
    pub sync: SyncConfig,
    /// Order of the emitted entries.
    pub order: SortOrder,
    /// Output document format.
    pub format: OutputFormat,
    /// Start after this identifier instead of the stored checkpoint.
    pub start_id: Option<String>,
}

impl FetchConfig {
    /// Defaults for `kind`: ascending JSON, default page size.
    pub fn new(kind: LogKind) -> Self {
        Self {
            kind,
            sync: SyncConfig::default(),
            order: SortOrder::default(),
            format: OutputFormat::default(),
            start_id: None,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub kind: LogKind,
    pub sync: SyncReport,
    /// Entries were written to the output.
    pub written: bool,
    /// Checkpoint the run started from.
    pub previous_checkpoint: String,
    /// Checkpoint for the next run.
    pub checkpoint: String,
    /// The checkpoint was saved to the state store.
    pub persisted: bool,
}

impl RunReport {
    /// Number of new entries delivered.
    pub fn entries(&self) -> usize {
        self.sync.entries_new
    }
}

/// Runs incremental fetches against a transport and a state store.
pub struct Fetcher<T: PageTransport, S: StateStore> {
    session: SyncSession<T>,
    state: S,
    config: FetchConfig,
}

impl<T: PageTransport, S: StateStore> Fetcher<T, S> {
    /// Create a new fetcher.
    pub fn new(transport: T, state: S, config: FetchConfig) -> Self {
        let session = SyncSession::new(transport, config.sync.clone());
        Self {
            session,
            state,
            config,
        }
    }

    pub fn transport(&self) -> &T {
        self.session.transport()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch everything newer than the checkpoint and write it to `out`.
    ///
    /// Nothing is written when there are no new entries. The checkpoint is
    /// saved only after the output has been written, and only when it moved.
    pub async fn run<W: Write>(&self, out: W) -> Result<RunReport> {
        match self.config.kind {
            LogKind::System => self.run_kind::<SystemLogEntry, W>(out).await,
            LogKind::Session => self.run_kind::<SessionLogEntry, W>(out).await,
        }
    }

    async fn run_kind<E: LogEntry, W: Write>(&self, out: W) -> Result<RunReport> {
        let mut state = self.state.load().await?;

        let start = match &self.config.start_id {
            Some(raw) => {
                let id = E::Id::parse(raw)?;
                debug!(kind = %E::KIND, start = %id, "using start override");
                id
            }
            None => state.get::<E>()?.unwrap_or_default(),
        };
        let previous_checkpoint = start.to_string();
        info!(kind = %E::KIND, checkpoint = %start, "fetching new entries");

        let mut store = RecordStore::<E>::new(start);
        let sync = self.session.run(&mut store).await?;

        store.sort(self.config.order);
        let written = store.serialize(out, self.config.format)?;
        debug!(kind = %E::KIND, format = %self.config.format, written, "output serialized");

        let checkpoint = store.checkpoint();
        let mut persisted = false;
        if !store.is_empty() {
            state.set::<E>(&checkpoint)?;
            self.state
                .save(&state)
                .await
                .map_err(|source| FetchError::Persist {
                    checkpoint: checkpoint.to_string(),
                    source,
                })?;
            persisted = true;
            info!(kind = %E::KIND, checkpoint = %checkpoint, "checkpoint saved");
        } else {
            debug!(kind = %E::KIND, "no new entries, checkpoint unchanged");
        }

        Ok(RunReport {
            kind: E::KIND,
            sync,
            written,
            previous_checkpoint,
            checkpoint: checkpoint.to_string(),
            persisted,
        })
    }
}
