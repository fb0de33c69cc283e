//! Product Repository Implementation
//!
//! PostgreSQL implementation of the ProductRepository trait, including the
//! keyset window query behind product listings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::{
    KeysetQuery, Product, ProductFilter, ProductRepository, ProductSize, ScanDirection,
};
use crate::infrastructure::database::{escape_like, map_constraint_error};
use crate::shared::error::AppError;

const NAME_CONFLICT: &str = "Product name already used in store";

const COLUMNS: &str = "id, store_id, category_id, price, cost, name, chosung, description, \
                       barcode, sell_by_days, size, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    store_id: i64,
    category_id: i64,
    price: i32,
    cost: i32,
    name: String,
    chosung: String,
    description: String,
    barcode: String,
    sell_by_days: i32,
    size: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: self.id,
            store_id: self.store_id,
            category_id: self.category_id,
            price: self.price,
            cost: self.cost,
            name: self.name,
            chosung: self.chosung,
            description: self.description,
            barcode: self.barcode,
            sell_by_days: self.sell_by_days,
            // The column is constrained to known sizes.
            size: ProductSize::parse(&self.size).unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL product repository implementation.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_in_store(&self, store_id: i64, id: i64) -> Result<Option<Product>, AppError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = $1 AND store_id = $2"
        ))
        .bind(id)
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_product()))
    }

    /// Keyset window over `(created_at, id)`.
    ///
    /// Served by the `(store_id, created_at DESC, id DESC)` index; the row
    /// comparison keeps ties on `created_at` stable.
    async fn find_page(
        &self,
        store_id: i64,
        filter: &ProductFilter,
        query: &KeysetQuery,
    ) -> Result<Vec<Product>, AppError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM products WHERE store_id = "));
        builder.push_bind(store_id);

        if let Some(term) = &filter.search {
            let pattern = format!("%{}%", escape_like(term));
            builder
                .push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR chosung ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(boundary) = &query.boundary {
            builder.push(match query.direction {
                ScanDirection::OlderThan => " AND (created_at, id) < (",
                ScanDirection::NewerThan => " AND (created_at, id) > (",
            });
            builder
                .push_bind(boundary.created_at)
                .push(", ")
                .push_bind(boundary.id)
                .push(")");
        }

        builder.push(match query.direction {
            ScanDirection::OlderThan => " ORDER BY created_at DESC, id DESC",
            ScanDirection::NewerThan => " ORDER BY created_at ASC, id ASC",
        });
        builder.push(" LIMIT ").push_bind(query.limit as i64);

        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_product()).collect())
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
                SELECT 1 FROM products
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

    async fn create(&self, product: &Product) -> Result<Product, AppError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (
                id, store_id, category_id, price, cost, name, chosung,
                description, barcode, sell_by_days, size, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(product.id)
        .bind(product.store_id)
        .bind(product.category_id)
        .bind(product.price)
        .bind(product.cost)
        .bind(&product.name)
        .bind(&product.chosung)
        .bind(&product.description)
        .bind(&product.barcode)
        .bind(product.sell_by_days)
        .bind(product.size.as_str())
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, NAME_CONFLICT))?;

        Ok(row.into_product())
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET category_id = $3, price = $4, cost = $5, name = $6, chosung = $7,
                description = $8, barcode = $9, sell_by_days = $10, size = $11,
                updated_at = $12
            WHERE id = $1 AND store_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(product.id)
        .bind(product.store_id)
        .bind(product.category_id)
        .bind(product.price)
        .bind(product.cost)
        .bind(&product.name)
        .bind(&product.chosung)
        .bind(&product.description)
        .bind(&product.barcode)
        .bind(product.sell_by_days)
        .bind(product.size.as_str())
        .bind(product.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, NAME_CONFLICT))?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        Ok(row.into_product())
    }

    async fn delete(&self, store_id: i64, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM products WHERE id = $1 AND store_id = $2")
            .bind(id)
            .bind(store_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
