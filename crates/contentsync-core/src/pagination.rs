//! Pagination walker
//!
//! Fetches a paged listing until it is exhausted and concatenates the pages.

use crate::api::ContentApi;
use crate::errors::Result;
use crate::model::{Group, PaginationSummary};
use serde_json::Value;

/// Page size used when the operator does not choose one
pub const DEFAULT_PAGE_SIZE: u32 = 250;

/// All entries of a listing, in page order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedPages {
    pub entries: Vec<Value>,
    /// Summary reported with the last page fetched
    pub pagination: Option<PaginationSummary>,
    /// Number of page requests issued
    pub requests: u32,
}

/// Entries of one listing page: `results`, else `data`, else none
pub fn page_entries(payload: &Value) -> Vec<Value> {
    ["results", "data"]
        .iter()
        .find_map(|field| payload.get(field).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}

/// Pagination summary of one listing page, if present and well-formed
///
/// Read from `meta.pagination`, else from a top-level `pagination` (the
/// content-manager listing shape).
pub fn page_summary(payload: &Value) -> Option<PaginationSummary> {
    payload
        .pointer("/meta/pagination")
        .or_else(|| payload.get("pagination"))
        .cloned()
        .and_then(|p| serde_json::from_value(p).ok())
}

/// Walk pages starting at 1 until the listing is exhausted
///
/// Continues while the current page is below the reported page count
/// (1 when unreported) and the page returned at least one entry. A page
/// shorter than requested does not end the walk. Fetch errors abort the walk
/// and propagate.
///
/// # Errors
///
/// Returns the first error produced by `fetch`.
pub fn walk_pages<F>(mut fetch: F) -> Result<CollectedPages>
where
    F: FnMut(u32) -> Result<Value>,
{
    let mut collected = CollectedPages::default();
    let mut page: u32 = 1;

    loop {
        let payload = fetch(page)?;
        collected.requests += 1;

        let entries = page_entries(&payload);
        let summary = page_summary(&payload);
        let page_count = summary
            .as_ref()
            .and_then(|s| s.page_count)
            .unwrap_or(1);
        let exhausted = entries.is_empty();

        collected.entries.extend(entries);
        collected.pagination = summary;

        if u64::from(page) >= page_count || exhausted {
            break;
        }
        page += 1;
    }

    Ok(collected)
}

/// Fetch every entry of a collection type through the admin API
///
/// # Errors
///
/// Returns the first transport error encountered.
pub fn fetch_collection<A: ContentApi + ?Sized>(
    api: &mut A,
    uid: &str,
    page_size: u32,
) -> Result<CollectedPages> {
    walk_pages(|page| {
        api.fetch_page(Group::CollectionTypes, uid, Some(page), page_size)
    })
}
