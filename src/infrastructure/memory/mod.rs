//! In-memory persistence backend.
//!
//! Implements every repository trait over plain collections behind one
//! `RwLock`, with the same semantics as the Postgres schema: unique names
//! per store, cascading deletes, keyset ordering and case-insensitive
//! search. Used by the `memory` storage backend and by tests, which can
//! read [`MemoryDatabase::query_count`] to pin persistence round-trips.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::{
    BlacklistedToken, Category, CategoryRepository, KeysetQuery, Keyed, Product, ProductFilter,
    ProductRepository, ScanDirection, Store, StoreRepository, TokenBlacklistRepository, User,
    UserRepository,
};
use crate::shared::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i64, User>,
    stores: HashMap<i64, Store>,
    categories: HashMap<i64, Category>,
    products: HashMap<i64, Product>,
    blacklist: HashMap<String, BlacklistedToken>,
}

/// Newest first, ties broken by id.
fn newest_first<T: Keyed>(rows: &mut [T]) {
    rows.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
}

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    tables: RwLock<Tables>,
    queries: AtomicU64,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository calls served since creation or the last reset.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn reset_query_count(&self) {
        self.queries.store(0, Ordering::SeqCst);
    }

    fn hit(&self) {
        self.queries.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for MemoryDatabase {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.hit();
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        self.hit();
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.phone == phone)
            .cloned())
    }

    async fn phone_exists(&self, phone: &str) -> Result<bool, AppError> {
        self.hit();
        Ok(self.tables.read().users.values().any(|u| u.phone == phone))
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        self.hit();
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.phone == user.phone) {
            return Err(AppError::Conflict("Phone already registered".into()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }
}

#[async_trait]
impl StoreRepository for MemoryDatabase {
    async fn find_by_id(&self, id: i64) -> Result<Option<Store>, AppError> {
        self.hit();
        Ok(self.tables.read().stores.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<Store>, AppError> {
        self.hit();
        let mut stores: Vec<Store> = self
            .tables
            .read()
            .stores
            .values()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        newest_first(&mut stores);
        Ok(stores)
    }

    async fn create(&self, store: &Store) -> Result<Store, AppError> {
        self.hit();
        self.tables.write().stores.insert(store.id, store.clone());
        Ok(store.clone())
    }

    async fn update(&self, store: &Store) -> Result<Store, AppError> {
        self.hit();
        let mut tables = self.tables.write();
        let existing = tables
            .stores
            .get_mut(&store.id)
            .ok_or_else(|| AppError::NotFound("Store not found".into()))?;
        existing.name = store.name.clone();
        existing.updated_at = store.updated_at;
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.hit();
        let mut tables = self.tables.write();
        tables.stores.remove(&id);
        tables.categories.retain(|_, c| c.store_id != id);
        tables.products.retain(|_, p| p.store_id != id);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryDatabase {
    async fn find_in_store(&self, store_id: i64, id: i64) -> Result<Option<Category>, AppError> {
        self.hit();
        Ok(self
            .tables
            .read()
            .categories
            .get(&id)
            .filter(|c| c.store_id == store_id)
            .cloned())
    }

    async fn find_by_store(&self, store_id: i64) -> Result<Vec<Category>, AppError> {
        self.hit();
        let mut categories: Vec<Category> = self
            .tables
            .read()
            .categories
            .values()
            .filter(|c| c.store_id == store_id)
            .cloned()
            .collect();
        newest_first(&mut categories);
        Ok(categories)
    }

    async fn name_exists(
        &self,
        store_id: i64,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        self.hit();
        Ok(self
            .tables
            .read()
            .categories
            .values()
            .any(|c| c.store_id == store_id && c.name == name && Some(c.id) != exclude_id))
    }

    async fn create(&self, category: &Category) -> Result<Category, AppError> {
        self.hit();
        let mut tables = self.tables.write();
        let taken = tables
            .categories
            .values()
            .any(|c| c.store_id == category.store_id && c.name == category.name);
        if taken {
            return Err(AppError::Conflict("Category name already used in store".into()));
        }
        tables.categories.insert(category.id, category.clone());
        Ok(category.clone())
    }

    async fn update(&self, category: &Category) -> Result<Category, AppError> {
        self.hit();
        let mut tables = self.tables.write();
        let taken = tables.categories.values().any(|c| {
            c.store_id == category.store_id && c.name == category.name && c.id != category.id
        });
        if taken {
            return Err(AppError::Conflict("Category name already used in store".into()));
        }
        let existing = tables
            .categories
            .get_mut(&category.id)
            .ok_or_else(|| AppError::NotFound("Category not found".into()))?;
        existing.name = category.name.clone();
        existing.updated_at = category.updated_at;
        Ok(existing.clone())
    }

    async fn delete(&self, store_id: i64, id: i64) -> Result<(), AppError> {
        self.hit();
        let mut tables = self.tables.write();
        if tables.categories.get(&id).is_some_and(|c| c.store_id == store_id) {
            tables.categories.remove(&id);
            tables.products.retain(|_, p| p.category_id != id);
        }
        Ok(())
    }
}

impl MemoryDatabase {
    fn product_name_taken(tables: &Tables, product: &Product) -> bool {
        tables.products.values().any(|p| {
            p.store_id == product.store_id && p.name == product.name && p.id != product.id
        })
    }

    fn category_in_store(tables: &Tables, product: &Product) -> bool {
        tables
            .categories
            .get(&product.category_id)
            .is_some_and(|c| c.store_id == product.store_id)
    }
}

#[async_trait]
impl ProductRepository for MemoryDatabase {
    async fn find_in_store(&self, store_id: i64, id: i64) -> Result<Option<Product>, AppError> {
        self.hit();
        Ok(self
            .tables
            .read()
            .products
            .get(&id)
            .filter(|p| p.store_id == store_id)
            .cloned())
    }

    async fn find_page(
        &self,
        store_id: i64,
        filter: &ProductFilter,
        query: &KeysetQuery,
    ) -> Result<Vec<Product>, AppError> {
        self.hit();
        let mut rows: Vec<Product> = self
            .tables
            .read()
            .products
            .values()
            .filter(|p| p.store_id == store_id && filter.matches(p) && query.admits(&p.sort_key()))
            .cloned()
            .collect();

        newest_first(&mut rows);
        if query.direction == ScanDirection::NewerThan {
            rows.reverse();
        }
        rows.truncate(query.limit);
        Ok(rows)
    }

    async fn name_exists(
        &self,
        store_id: i64,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        self.hit();
        Ok(self
            .tables
            .read()
            .products
            .values()
            .any(|p| p.store_id == store_id && p.name == name && Some(p.id) != exclude_id))
    }

    async fn create(&self, product: &Product) -> Result<Product, AppError> {
        self.hit();
        let mut tables = self.tables.write();
        if !Self::category_in_store(&tables, product) {
            return Err(AppError::BadRequest("Category does not belong to store".into()));
        }
        if Self::product_name_taken(&tables, product) {
            return Err(AppError::Conflict("Product name already used in store".into()));
        }
        tables.products.insert(product.id, product.clone());
        Ok(product.clone())
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        self.hit();
        let mut tables = self.tables.write();
        if !Self::category_in_store(&tables, product) {
            return Err(AppError::BadRequest("Category does not belong to store".into()));
        }
        if Self::product_name_taken(&tables, product) {
            return Err(AppError::Conflict("Product name already used in store".into()));
        }
        let existing = tables
            .products
            .get_mut(&product.id)
            .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
        // created_at and store_id are immutable
        *existing = Product {
            created_at: existing.created_at,
            store_id: existing.store_id,
            ..product.clone()
        };
        Ok(existing.clone())
    }

    async fn delete(&self, store_id: i64, id: i64) -> Result<(), AppError> {
        self.hit();
        let mut tables = self.tables.write();
        if tables.products.get(&id).is_some_and(|p| p.store_id == store_id) {
            tables.products.remove(&id);
        }
        Ok(())
    }
}

#[async_trait]
impl TokenBlacklistRepository for MemoryDatabase {
    async fn blacklist(&self, token: &BlacklistedToken) -> Result<bool, AppError> {
        self.hit();
        let mut tables = self.tables.write();
        if tables.blacklist.contains_key(&token.jti) {
            return Ok(false);
        }
        tables.blacklist.insert(token.jti.clone(), token.clone());
        Ok(true)
    }

    async fn is_blacklisted(&self, jti: &str) -> Result<bool, AppError> {
        self.hit();
        Ok(self.tables.read().blacklist.contains_key(jti))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        self.hit();
        let mut tables = self.tables.write();
        let before = tables.blacklist.len();
        tables.blacklist.retain(|_, t| t.expires_at > now);
        Ok((before - tables.blacklist.len()) as u64)
    }
}
