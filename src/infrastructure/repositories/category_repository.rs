//! Category Repository Implementation
//!
//! PostgreSQL implementation of the CategoryRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Category, CategoryRepository};
use crate::infrastructure::database::map_constraint_error;
use crate::shared::error::AppError;

const NAME_CONFLICT: &str = "Category name already used in store";

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    store_id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: self.id,
            store_id: self.store_id,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL category repository implementation.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_in_store(&self, store_id: i64, id: i64) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, store_id, name, created_at, updated_at
            FROM categories
            WHERE id = $1 AND store_id = $2
            "#,
        )
        .bind(id)
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_category()))
    }

    async fn find_by_store(&self, store_id: i64) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, store_id, name, created_at, updated_at
            FROM categories
            WHERE store_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_category()).collect())
    }

    async fn name_exists(
        &self,
        store_id: i64,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE store_id = $1 AND name = $2 AND ($3::BIGINT IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, category: &Category) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (id, store_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, store_id, name, created_at, updated_at
            "#,
        )
        .bind(category.id)
        .bind(category.store_id)
        .bind(&category.name)
        .bind(category.created_at)
        .bind(category.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, NAME_CONFLICT))?;

        Ok(row.into_category())
    }

    async fn update(&self, category: &Category) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $3, updated_at = $4
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, name, created_at, updated_at
            "#,
        )
        .bind(category.id)
        .bind(category.store_id)
        .bind(&category.name)
        .bind(category.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, NAME_CONFLICT))?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        Ok(row.into_category())
    }

    async fn delete(&self, store_id: i64, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM categories WHERE id = $1 AND store_id = $2")
            .bind(id)
            .bind(store_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
