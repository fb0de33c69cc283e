//! Store entity and repository trait.
//!
//! Maps to the `stores` table. A store is the tenant boundary: categories
//! and products always belong to exactly one store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Keyed, SortKey};
use crate::shared::error::AppError;

/// Minimum store name length in characters.
pub const STORE_NAME_MIN: u64 = 3;
/// Maximum store name length in characters.
pub const STORE_NAME_MAX: u64 = 32;

/// A storefront owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Owning user; deleting the store cascades to its catalog
    pub owner_id: i64,

    /// Display name (3-32 characters)
    pub name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn new(id: i64, owner_id: i64, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Keyed for Store {
    fn sort_key(&self) -> SortKey {
        SortKey::new(self.created_at, self.id)
    }
}

/// Repository trait for Store data access operations.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Find a store by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Store>, AppError>;

    /// List stores owned by a user, newest first.
    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<Store>, AppError>;

    /// Create a new store.
    async fn create(&self, store: &Store) -> Result<Store, AppError>;

    /// Persist a changed name.
    async fn update(&self, store: &Store) -> Result<Store, AppError>;

    /// Delete a store together with its categories and products.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
