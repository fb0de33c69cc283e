//! Category entity and repository trait.
//!
//! Maps to the `categories` table. Names are unique per store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Keyed, SortKey};
use crate::shared::error::AppError;

/// Maximum category name length in characters.
pub const CATEGORY_NAME_MAX: u64 = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(id: i64, store_id: i64, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            store_id,
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Keyed for Category {
    fn sort_key(&self) -> SortKey {
        SortKey::new(self.created_at, self.id)
    }
}

/// Repository trait for Category data access operations.
///
/// Lookups are always scoped to a store so a category id from another
/// store reads as missing.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by ID within a store.
    async fn find_in_store(&self, store_id: i64, id: i64) -> Result<Option<Category>, AppError>;

    /// List all categories of a store, newest first.
    async fn find_by_store(&self, store_id: i64) -> Result<Vec<Category>, AppError>;

    /// Check whether a name is taken in the store, ignoring `exclude_id`.
    async fn name_exists(
        &self,
        store_id: i64,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>;

    /// Create a new category.
    async fn create(&self, category: &Category) -> Result<Category, AppError>;

    /// Persist a changed name.
    async fn update(&self, category: &Category) -> Result<Category, AppError>;

    /// Delete a category and the products filed under it.
    async fn delete(&self, store_id: i64, id: i64) -> Result<(), AppError>;
}
