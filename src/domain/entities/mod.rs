//! # Domain Entities
//!
//! Core domain entities of the storefront. All entities map directly to
//! their corresponding database tables.
//!
//! - **User**: account identified by phone number
//! - **Store**: tenant boundary owned by a user
//! - **Category**: store-scoped product grouping
//! - **Product**: store-scoped item with a derived chosung search key
//! - **BlacklistedToken**: revoked refresh token
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod category;
mod product;
mod store;
mod token;
mod user;

pub use category::{Category, CategoryRepository, CATEGORY_NAME_MAX};
pub use product::{
    Product, ProductFilter, ProductRepository, ProductSize, BARCODE_MAX, PRODUCT_NAME_MAX,
};
pub use store::{Store, StoreRepository, STORE_NAME_MAX, STORE_NAME_MIN};
pub use token::{BlacklistedToken, TokenBlacklistRepository};
pub use user::{User, UserRepository};
