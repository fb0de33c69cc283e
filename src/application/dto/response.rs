//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::pagination::Page;
use crate::domain::{Category, Product, ProductSize, Store, User};

/// Registered user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub phone: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone: user.phone,
        }
    }
}

/// Access and refresh token pair
#[derive(Debug, Clone, Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// Fresh access token
#[derive(Debug, Clone, Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// Body of operations that succeed with nothing to report (`{}`)
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyResponse {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreResponse {
    pub id: i64,
    pub owner: i64,
    pub name: String,
}

impl From<Store> for StoreResponse {
    fn from(store: Store) -> Self {
        Self {
            id: store.id,
            owner: store.owner_id,
            name: store.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub store: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            store: category.store_id,
            name: category.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub store: i64,
    pub category: i64,
    pub price: i32,
    pub cost: i32,
    pub name: String,
    pub chosung: String,
    pub description: String,
    pub barcode: String,
    pub sell_by_days: i32,
    pub size: ProductSize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            store: product.store_id,
            category: product.category_id,
            price: product.price,
            cost: product.cost,
            name: product.name,
            chosung: product.chosung,
            description: product.description,
            barcode: product.barcode,
            sell_by_days: product.sell_by_days,
            size: product.size,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// One page of a cursor-paginated listing
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T, U: From<T>> From<Page<T>> for PageResponse<U> {
    fn from(page: Page<T>) -> Self {
        Self {
            next: page.next,
            previous: page.previous,
            results: page.results.into_iter().map(U::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_store_response_shape() {
        let body = serde_json::to_value(StoreResponse::from(Store::new(5, 2, "Corner Cafe"))).unwrap();
        assert_eq!(body, json!({"id": 5, "owner": 2, "name": "Corner Cafe"}));
    }

    #[test]
    fn test_empty_response_is_empty_object() {
        assert_eq!(serde_json::to_value(EmptyResponse::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_product_size_serialized_lowercase() {
        let product = Product {
            size: ProductSize::Large,
            ..Default::default()
        };
        let body = serde_json::to_value(ProductResponse::from(product)).unwrap();
        assert_eq!(body["size"], "large");
    }
}
