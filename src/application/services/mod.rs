//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: JWT token pairs, refresh and revocation
//! - **UserService**: Account registration
//! - **StoreService**: Store management for the owner
//! - **CategoryService**: Store-scoped categories
//! - **ProductService**: Store-scoped products, search and pagination

pub mod auth_service;
pub mod category_service;
pub mod product_service;
pub mod store_service;
pub mod user_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl, Claims, TokenKind, TokenPair};
pub use category_service::{CategoryService, CategoryServiceImpl};
pub use product_service::{ProductService, ProductServiceImpl};
pub use store_service::{StoreError, StoreService, StoreServiceImpl};
pub use user_service::{UserError, UserService, UserServiceImpl};
