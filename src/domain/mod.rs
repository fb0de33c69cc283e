//! # Domain Layer
//!
//! The domain layer contains the core business rules of the storefront.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Store, Category, Product)
//! - **value_objects**: Immutable value types (keyset positions)
//! - **services**: Chosung transliteration and ownership checks
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
