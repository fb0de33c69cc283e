//! Keyset positions for reverse-chronological listings.
//!
//! Rows are ordered by `(created_at DESC, id DESC)`. A [`SortKey`] names one
//! position in that order and a [`KeysetQuery`] asks for the rows on one
//! side of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position of a row in the listing order.
///
/// Derived `Ord` compares `created_at` first and `id` second, which is the
/// ascending form of the listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

impl SortKey {
    pub fn new(created_at: DateTime<Utc>, id: i64) -> Self {
        Self { created_at, id }
    }
}

/// Which side of the boundary to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Rows after the boundary in listing order, newest first.
    OlderThan,
    /// Rows before the boundary in listing order, oldest first.
    NewerThan,
}

impl ScanDirection {
    pub fn reverse(self) -> Self {
        match self {
            Self::OlderThan => Self::NewerThan,
            Self::NewerThan => Self::OlderThan,
        }
    }

    /// Whether `key` lies strictly on this side of `boundary`.
    pub fn admits(self, boundary: &SortKey, key: &SortKey) -> bool {
        match self {
            Self::OlderThan => key < boundary,
            Self::NewerThan => key > boundary,
        }
    }
}

/// One window request handed to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeysetQuery {
    /// Exclusive boundary; `None` starts from the newest row.
    pub boundary: Option<SortKey>,
    pub direction: ScanDirection,
    pub limit: usize,
}

impl KeysetQuery {
    /// Whether `key` falls inside this window's half-open range.
    pub fn admits(&self, key: &SortKey) -> bool {
        self.boundary
            .as_ref()
            .map_or(true, |boundary| self.direction.admits(boundary, key))
    }
}

/// Entities that can be listed with keyset pagination.
pub trait Keyed {
    fn sort_key(&self) -> SortKey;
}
