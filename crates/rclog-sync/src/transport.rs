//! Transport abstraction for page retrieval.
//!
//! A transport turns `(offset, limit)` into one newest-first page of entries
//! for the requested log kind. The HTTP implementation lives in
//! [`crate::http`]; an in-memory one for tests lives here.

use async_trait::async_trait;
use rclog_core::LogEntry;

use crate::error::Result;

/// One page request as seen by a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u32,
}

/// Transport trait for fetching pages of log entries.
///
/// Implementations must be thread-safe (Send + Sync). The log kind is taken
/// from `E::KIND`.
#[async_trait]
pub trait PageTransport: Send + Sync {
    /// Fetch up to `limit` entries starting `offset` entries from the newest.
    async fn fetch_page<E: LogEntry>(&self, offset: u64, limit: u32) -> Result<Vec<E>>;
}

/// An in-memory transport for testing.
///
/// Serves either a simulated remote log or a fixed script of responses, and
/// records every request it receives.
pub mod memory {
    use super::*;
    use std::collections::{BTreeMap, VecDeque};
    use std::sync::Mutex;

    use bytes::Bytes;
    use serde_json::Value;

    use crate::error::SyncError;
    use crate::page::decode_page;

    /// A scripted response.
    enum Scripted {
        Body(Bytes),
        Fail(SyncError),
    }

    enum Source {
        /// Newest-first entries, sliced by offset.
        Remote {
            entries: Vec<Value>,
            /// Entries prepended once the given number of fetches completed.
            inserts: BTreeMap<usize, Vec<Value>>,
        },
        /// Responses returned in call order; an exhausted script yields empty pages.
        Script(VecDeque<Scripted>),
    }

    struct Inner {
        source: Source,
        requests: Vec<PageRequest>,
    }

    /// In-memory transport implementation.
    pub struct MemoryTransport {
        inner: Mutex<Inner>,
    }

    fn to_values<E: LogEntry>(entries: &[E]) -> Vec<Value> {
        entries
            .iter()
            .map(|e| serde_json::to_value(e).expect("log entry serializes"))
            .collect()
    }

    impl MemoryTransport {
        fn with_source(source: Source) -> Self {
            Self {
                inner: Mutex::new(Inner {
                    source,
                    requests: Vec::new(),
                }),
            }
        }

        /// Serve `entries` (newest-first) as the whole remote log.
        pub fn remote<E: LogEntry>(entries: &[E]) -> Self {
            Self::with_source(Source::Remote {
                entries: to_values(entries),
                inserts: BTreeMap::new(),
            })
        }

        /// Start an empty script.
        pub fn scripted() -> Self {
            Self::with_source(Source::Script(VecDeque::new()))
        }

        /// After `fetches` pages have been served, prepend `entries` to the
        /// remote log as if the server had produced them meanwhile.
        ///
        /// Has no effect on a scripted transport.
        pub fn insert_after<E: LogEntry>(self, fetches: usize, entries: &[E]) -> Self {
            {
                let mut inner = self.inner.lock().unwrap();
                if let Source::Remote { inserts, .. } = &mut inner.source {
                    inserts.entry(fetches).or_default().extend(to_values(entries));
                }
            }
            self
        }

        /// Append a page of entries to the script.
        pub fn with_page<E: LogEntry>(self, entries: &[E]) -> Self {
            let body = serde_json::json!({ "entries": to_values(entries) });
            self.with_body(body.to_string())
        }

        /// Append a raw response body to the script.
        pub fn with_body(self, body: impl Into<Bytes>) -> Self {
            self.push(Scripted::Body(body.into()))
        }

        /// Append a failure to the script.
        pub fn with_failure(self, error: SyncError) -> Self {
            self.push(Scripted::Fail(error))
        }

        fn push(self, item: Scripted) -> Self {
            {
                let mut inner = self.inner.lock().unwrap();
                if let Source::Script(script) = &mut inner.source {
                    script.push_back(item);
                }
            }
            self
        }

        /// Every request served so far, in order.
        pub fn requests(&self) -> Vec<PageRequest> {
            self.inner.lock().unwrap().requests.clone()
        }

        fn next_body(&self, offset: u64, limit: u32) -> std::result::Result<Bytes, SyncError> {
            let mut inner = self.inner.lock().unwrap();
            let served = inner.requests.len();
            inner.requests.push(PageRequest { offset, limit });

            match &mut inner.source {
                Source::Remote { entries, inserts } => {
                    if let Some(mut newer) = inserts.remove(&served) {
                        newer.append(entries);
                        *entries = newer;
                    }
                    let start = usize::try_from(offset).unwrap_or(usize::MAX).min(entries.len());
                    let end = start.saturating_add(limit as usize).min(entries.len());
                    let page = &entries[start..end];
                    let body = serde_json::json!({ "entries": page });
                    Ok(Bytes::from(body.to_string()))
                }
                Source::Script(script) => match script.pop_front() {
                    Some(Scripted::Body(body)) => Ok(body),
                    Some(Scripted::Fail(error)) => Err(error),
                    None => Ok(Bytes::from_static(br#"{"entries":[]}"#)),
                },
            }
        }
    }

    #[async_trait]
    impl PageTransport for MemoryTransport {
        async fn fetch_page<E: LogEntry>(&self, offset: u64, limit: u32) -> Result<Vec<E>> {
            let body = self.next_body(offset, limit)?;
            decode_page(&body)
        }
    }
}
