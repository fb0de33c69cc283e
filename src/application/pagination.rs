//! Keyset cursor pagination.
//!
//! Listings are ordered by `(created_at DESC, id DESC)` and sliced by value,
//! never by offset, so rows inserted or deleted between requests are neither
//! repeated nor skipped. Cursors are URL-safe base64 JSON naming a boundary
//! row and the direction to read from it.

use std::future::Future;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{KeysetQuery, Keyed, ScanDirection, SortKey};
use crate::shared::error::AppError;

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// Opaque position handed to clients as `next` / `previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub boundary: SortKey,
    pub direction: ScanDirection,
}

#[derive(Serialize, Deserialize)]
struct CursorPayload {
    t: DateTime<Utc>,
    i: i64,
    #[serde(default)]
    r: bool,
}

impl Cursor {
    pub fn new(boundary: SortKey, direction: ScanDirection) -> Self {
        Self {
            boundary,
            direction,
        }
    }

    pub fn encode(&self) -> String {
        let payload = CursorPayload {
            t: self.boundary.created_at,
            i: self.boundary.id,
            r: self.direction == ScanDirection::NewerThan,
        };
        // Serializing a struct of plain fields cannot fail.
        let json = serde_json::to_vec(&payload).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    pub fn decode(token: &str) -> Result<Self, PaginationError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim_end_matches('='))
            .map_err(|_| PaginationError::InvalidCursor)?;
        let payload: CursorPayload =
            serde_json::from_slice(&bytes).map_err(|_| PaginationError::InvalidCursor)?;

        let direction = if payload.r {
            ScanDirection::NewerThan
        } else {
            ScanDirection::OlderThan
        };
        Ok(Self::new(SortKey::new(payload.t, payload.i), direction))
    }
}

/// One page of results in listing order.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PaginationError {
    #[error("Invalid cursor")]
    InvalidCursor,

    #[error(transparent)]
    Fetch(#[from] AppError),
}

/// Fetch the page addressed by `cursor`.
///
/// `fetch` runs one keyset window against the store of rows and must return
/// rows in scan order. One extra row is requested to detect a following
/// page; a one-row probe in the opposite direction decides whether a link
/// back is emitted.
pub async fn paginate<T, F, Fut>(
    cursor: Option<&str>,
    page_size: usize,
    fetch: F,
) -> Result<Page<T>, PaginationError>
where
    T: Keyed,
    F: Fn(KeysetQuery) -> Fut,
    Fut: Future<Output = Result<Vec<T>, AppError>>,
{
    let cursor = cursor
        .filter(|c| !c.is_empty())
        .map(Cursor::decode)
        .transpose()?;

    let (boundary, direction) = match cursor {
        Some(c) => (Some(c.boundary), c.direction),
        None => (None, ScanDirection::OlderThan),
    };

    let mut rows = fetch(KeysetQuery {
        boundary,
        direction,
        limit: page_size + 1,
    })
    .await?;

    let has_more = rows.len() > page_size;
    rows.truncate(page_size);

    // Rows are still in scan order, so the first one sits next to the boundary.
    let back_edge = rows.first().map(Keyed::sort_key).or(boundary);

    let has_back = match back_edge {
        Some(edge) if boundary.is_some() => !fetch(KeysetQuery {
            boundary: Some(edge),
            direction: direction.reverse(),
            limit: 1,
        })
        .await?
        .is_empty(),
        _ => false,
    };

    if direction == ScanDirection::NewerThan {
        rows.reverse();
    }

    let (has_next, has_previous) = match direction {
        ScanDirection::OlderThan => (has_more, has_back),
        ScanDirection::NewerThan => (has_back, has_more),
    };

    let next = match rows.last() {
        Some(last) if has_next => Some(Cursor::new(last.sort_key(), ScanDirection::OlderThan)),
        None if has_next => boundary.map(|b| Cursor::new(b, ScanDirection::OlderThan)),
        _ => None,
    };
    let previous = match rows.first() {
        Some(first) if has_previous => Some(Cursor::new(first.sort_key(), ScanDirection::NewerThan)),
        None if has_previous => boundary.map(|b| Cursor::new(b, ScanDirection::NewerThan)),
        _ => None,
    };

    Ok(Page {
        results: rows,
        next: next.map(|c| c.encode()),
        previous: previous.map(|c| c.encode()),
    })
}
