//! Product entity and repository trait.
//!
//! Maps to the `products` table. Every product belongs to a store and to a
//! category of that same store; `chosung` mirrors the name's initial
//! consonants and is kept in sync by the product service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::chosung;
use crate::domain::value_objects::{KeysetQuery, Keyed, SortKey};
use crate::shared::error::AppError;

/// Maximum product name length in characters.
pub const PRODUCT_NAME_MAX: u64 = 32;
/// Maximum barcode length in characters.
pub const BARCODE_MAX: u64 = 16;

/// Package size of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductSize {
    #[default]
    Small,
    Large,
}

impl ProductSize {
    /// Parse the wire/database representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "small" => Some(Self::Small),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

impl std::fmt::Display for ProductSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An item sold by a store.
///
/// Maps to the `products` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - store_id: BIGINT NOT NULL REFERENCES stores ON DELETE CASCADE
/// - category_id: BIGINT NOT NULL, same store as the product
/// - price, cost, sell_by_days: INTEGER NOT NULL CHECK (>= 0)
/// - name: VARCHAR(32) NOT NULL, UNIQUE (store_id, name)
/// - chosung: VARCHAR(32) NOT NULL
/// - description: TEXT NOT NULL
/// - barcode: VARCHAR(16) NOT NULL
/// - size: VARCHAR(8) NOT NULL ('small' | 'large')
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub store_id: i64,
    pub category_id: i64,
    pub price: i32,
    pub cost: i32,
    pub name: String,
    pub chosung: String,
    pub description: String,
    pub barcode: String,
    /// Shelf life in days
    pub sell_by_days: i32,
    pub size: ProductSize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Replace the name and recompute the derived chosung.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.chosung = chosung::transliterate(&self.name);
    }
}

impl Default for Product {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            store_id: 0,
            category_id: 0,
            price: 0,
            cost: 0,
            name: String::new(),
            chosung: String::new(),
            description: String::new(),
            barcode: String::new(),
            sell_by_days: 0,
            size: ProductSize::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Keyed for Product {
    fn sort_key(&self) -> SortKey {
        SortKey::new(self.created_at, self.id)
    }
}

/// Filter applied to a store's product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against name or chosung
    pub search: Option<String>,
}

impl ProductFilter {
    /// Build a filter; blank search terms disable filtering.
    pub fn search(term: Option<&str>) -> Self {
        Self {
            search: term.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }

    /// Whether a product satisfies the filter.
    pub fn matches(&self, product: &Product) -> bool {
        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product.chosung.to_lowercase().contains(&term)
            }
        }
    }
}

/// Repository trait for Product data access operations.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by ID within a store.
    async fn find_in_store(&self, store_id: i64, id: i64) -> Result<Option<Product>, AppError>;

    /// Fetch one keyset window of a store's products.
    ///
    /// Rows come back in scan order: newest first for `OlderThan`, oldest
    /// first for `NewerThan`.
    async fn find_page(
        &self,
        store_id: i64,
        filter: &ProductFilter,
        query: &KeysetQuery,
    ) -> Result<Vec<Product>, AppError>;

    /// Check whether a name is taken in the store, ignoring `exclude_id`.
    async fn name_exists(
        &self,
        store_id: i64,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>;

    /// Create a new product.
    async fn create(&self, product: &Product) -> Result<Product, AppError>;

    /// Persist all mutable fields.
    async fn update(&self, product: &Product) -> Result<Product, AppError>;

    /// Delete a product.
    async fn delete(&self, store_id: i64, id: i64) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str) -> Product {
        let mut product = Product::default();
        product.rename(name);
        product
    }

    #[test]
    fn test_rename_recomputes_chosung() {
        let mut p = product("슈크림 라떼");
        assert_eq!(p.chosung, "ㅅㅋㄹ ㄹㄸ");

        p.rename("Latte 2");
        assert_eq!(p.chosung, "Latte 2");
    }

    #[test]
    fn test_size_round_trip() {
        assert_eq!(ProductSize::parse("large"), Some(ProductSize::Large));
        assert_eq!(ProductSize::parse("xlarge"), None);
        assert_eq!(ProductSize::Small.to_string(), "small");
    }

    #[test]
    fn test_filter_matches_name_or_chosung() {
        let p = product("슈크림 라떼");

        assert!(ProductFilter::search(None).matches(&p));
        assert!(ProductFilter::search(Some("")).matches(&p));
        assert!(ProductFilter::search(Some("라떼")).matches(&p));
        assert!(ProductFilter::search(Some("ㅅㅋㄹ")).matches(&p));
        assert!(!ProductFilter::search(Some("ㄱㄴ")).matches(&p));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let p = product("Vanilla Latte");
        assert!(ProductFilter::search(Some("LATTE")).matches(&p));
    }
}
