//! Decoding of API response bodies.

use rclog_core::LogEntry;
use serde::Deserialize;

use crate::error::Result;

/// Body shape shared by both log resources: `{ "entries": [ ... ] }`.
#[derive(Deserialize)]
#[serde(bound(deserialize = "E: LogEntry"))]
struct PageBody<E> {
    #[serde(default)]
    entries: Vec<E>,
}

/// Decode one page. A body without `entries` is an empty page.
pub fn decode_page<E: LogEntry>(body: &[u8]) -> Result<Vec<E>> {
    let page: PageBody<E> = serde_json::from_slice(body)?;
    Ok(page.entries)
}
