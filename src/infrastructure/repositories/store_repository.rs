//! Store Repository Implementation
//!
//! PostgreSQL implementation of the StoreRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Store, StoreRepository};
use crate::infrastructure::database::map_constraint_error;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: i64,
    owner_id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoreRow {
    fn into_store(self) -> Store {
        Store {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL store repository implementation.
#[derive(Clone)]
pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Store>, AppError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, owner_id, name, created_at, updated_at
            FROM stores
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_store()))
    }

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<Store>, AppError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, owner_id, name, created_at, updated_at
            FROM stores
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_store()).collect())
    }

    async fn create(&self, store: &Store) -> Result<Store, AppError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            INSERT INTO stores (id, owner_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, name, created_at, updated_at
            "#,
        )
        .bind(store.id)
        .bind(store.owner_id)
        .bind(&store.name)
        .bind(store.created_at)
        .bind(store.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Store with this ID already exists"))?;

        Ok(row.into_store())
    }

    async fn update(&self, store: &Store) -> Result<Store, AppError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            UPDATE stores
            SET name = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, owner_id, name, created_at, updated_at
            "#,
        )
        .bind(store.id)
        .bind(&store.name)
        .bind(store.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found".to_string()))?;

        Ok(row.into_store())
    }

    /// Categories and products go with it via ON DELETE CASCADE.
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
