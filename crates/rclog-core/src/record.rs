//! Record store: the accumulator and checkpoint for one retrieval run.
//!
//! Pages arrive newest-first. Each page is first cut down to the entries newer
//! than the checkpoint ([`filter_page`]) and then folded into the accumulator
//! with any overlap removed ([`merge_page`]). Both steps locate their cut with
//! [`Identifier::boundary`], so the numeric kind gets a binary search and the
//! opaque kind gets an equality scan without either path knowing the other.

use std::io::Write;

use crate::encode::{write_csv, write_json, OutputFormat};
use crate::entry::{LogEntry, SessionLogEntry, SystemLogEntry};
use crate::error::Result;
use crate::types::Identifier;

/// Record store for the system log (numeric ids).
pub type SystemLogs = RecordStore<SystemLogEntry>;

/// Record store for the session log (opaque ids).
pub type SessionLogs = RecordStore<SessionLogEntry>;

/// Requested order of the final output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Ascending,
    /// Newest first.
    Descending,
}

/// A page trimmed against a checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Filtered<E> {
    /// Entries strictly newer than the checkpoint, newest-first.
    pub entries: Vec<E>,
    /// Whether the checkpoint boundary was located inside the page.
    pub found: bool,
}

/// Trim `page` to the prefix newer than `checkpoint`.
///
/// When the boundary is absent the page is returned whole with
/// `found == false`; the caller keeps paging unless the page was empty.
pub fn filter_page<E: LogEntry>(mut page: Vec<E>, checkpoint: &E::Id) -> Filtered<E> {
    let n = E::Id::boundary(&page, checkpoint);
    if n == page.len() {
        return Filtered {
            entries: page,
            found: false,
        };
    }
    page.truncate(n);
    Filtered {
        entries: page,
        found: true,
    }
}

/// Fold `page` into `accumulator`, dropping entries both of them hold.
///
/// Later pages can re-report entries from earlier ones when the server gains
/// entries between requests. The accumulator is truncated at the first entry
/// that the page's newest entry reaches, then the page is appended.
pub fn merge_page<E: LogEntry>(accumulator: &mut Vec<E>, page: Vec<E>) {
    let Some(newest) = page.first() else {
        return;
    };
    if accumulator.is_empty() {
        *accumulator = page;
        return;
    }
    let n = E::Id::boundary(accumulator, newest.id());
    accumulator.truncate(n);
    accumulator.extend(page);
}

/// Accumulated entries for one run, plus the checkpoint they are measured from.
#[derive(Debug, Clone)]
pub struct RecordStore<E: LogEntry> {
    /// Newest id delivered by a previous run.
    checkpoint: E::Id,
    /// Entries gathered this run, newest-first until [`RecordStore::sort`].
    entries: Vec<E>,
    /// Id of the newest accumulated entry, independent of later sorting.
    head: Option<E::Id>,
}

impl<E: LogEntry> RecordStore<E> {
    /// Create an empty store that treats `checkpoint` as already delivered.
    pub fn new(checkpoint: E::Id) -> Self {
        Self {
            checkpoint,
            entries: Vec::new(),
            head: None,
        }
    }

    /// The checkpoint this run started from.
    pub fn prior_checkpoint(&self) -> &E::Id {
        &self.checkpoint
    }

    /// Checkpoint to persist after this run.
    ///
    /// The newest accumulated id, or the prior checkpoint if nothing new
    /// was retrieved.
    pub fn checkpoint(&self) -> E::Id {
        self.head.clone().unwrap_or_else(|| self.checkpoint.clone())
    }

    /// Trim a page against this store's checkpoint.
    pub fn filter(&self, page: Vec<E>) -> Filtered<E> {
        filter_page(page, &self.checkpoint)
    }

    /// Fold a filtered page into the accumulator.
    pub fn merge(&mut self, page: Vec<E>) {
        merge_page(&mut self.entries, page);
        self.head = self.entries.first().map(|entry| entry.id().clone());
    }

    /// Stable sort of the accumulator in the requested direction.
    ///
    /// Only called once fetching is complete.
    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Ascending => self.entries.sort_by(|a, b| a.sort_cmp(b)),
            SortOrder::Descending => self.entries.sort_by(|a, b| b.sort_cmp(a)),
        }
    }

    /// Write the accumulator to `out`.
    ///
    /// Returns `Ok(false)` without writing anything when the store is empty.
    pub fn serialize<W: Write>(&self, out: W, format: OutputFormat) -> Result<bool> {
        if self.entries.is_empty() {
            return Ok(false);
        }
        match format {
            OutputFormat::Json => write_json(out, &self.entries)?,
            OutputFormat::Csv => write_csv(out, &self.entries)?,
        }
        Ok(true)
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: LogEntry> Default for RecordStore<E> {
    fn default() -> Self {
        Self::new(E::Id::default())
    }
}
