//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgUserRepository** - User accounts
//! - **PgStoreRepository** - Stores (cascading deletes)
//! - **PgCategoryRepository** - Store-scoped categories
//! - **PgProductRepository** - Store-scoped products with keyset listing
//! - **PgTokenBlacklistRepository** - Revoked refresh tokens
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use storefront_api::infrastructure::repositories::{PgStoreRepository, PgProductRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let store_repo = PgStoreRepository::new(pool.clone());
//!     let product_repo = PgProductRepository::new(pool);
//! }
//! ```

pub mod category_repository;
pub mod product_repository;
pub mod store_repository;
pub mod token_repository;
pub mod user_repository;

pub use category_repository::PgCategoryRepository;
pub use product_repository::PgProductRepository;
pub use store_repository::PgStoreRepository;
pub use token_repository::PgTokenBlacklistRepository;
pub use user_repository::PgUserRepository;
