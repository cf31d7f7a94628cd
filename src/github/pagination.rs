//! Cursor-based pagination over GitHub GraphQL connections.
//!
//! The GraphQL API pages large result sets behind `pageInfo { endCursor
//! hasNextPage }`. This module isolates the cursor-threading loop so callers
//! deal in complete sequences rather than wire-level pages.

use std::future::Future;

use super::error::ReportError;

/// One page of a cursor-paginated connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPage<T> {
    /// Items carried by this page, in API order.
    pub items: Vec<T>,
    /// Cursor to resume from, when another page exists.
    pub end_cursor: Option<String>,
    /// Whether another page follows this one.
    pub has_next_page: bool,
}

/// Drains a cursor-paginated connection into one ordered sequence.
///
/// `fetch_page` is invoked with `None` for the first page and with the
/// previous page's end cursor thereafter, until a page reports
/// `has_next_page = false`. Items accumulate in API order.
///
/// # Errors
///
/// Propagates the first page fetch failure unchanged; no partial result is
/// returned. A page claiming a successor without supplying a cursor is
/// treated as a protocol error.
pub async fn collect_all_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, ReportError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>, ReportError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch_page(cursor.take()).await?;
        items.extend(page.items);
        if !page.has_next_page {
            return Ok(items);
        }
        if page.end_cursor.is_none() {
            return Err(ReportError::Graphql {
                message: "pageInfo reported another page without an end cursor".to_owned(),
            });
        }
        cursor = page.end_cursor;
    }
}
