//! # Storefront API Library
//!
//! A multi-tenant storefront backend:
//! - Phone-number accounts with JWT access/refresh tokens and revocation
//! - Stores owned by one user, with store-scoped categories and products
//! - Product search by name or Hangul initial consonants (chosung)
//! - Keyset cursor pagination and a uniform `{meta, data}` response envelope
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities, repository traits, chosung and ownership rules
//! - **Application Layer**: Services, DTOs and the cursor paginator
//! - **Infrastructure Layer**: PostgreSQL and in-memory repositories, metrics
//! - **Presentation Layer**: HTTP handlers, extractors and middleware
//!
//! ## Module Structure
//!
//! ```text
//! storefront_api/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, domain services
//! +-- application/    Services, DTOs, pagination
//! +-- infrastructure/ Database, memory backend, metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Errors, validation, passwords, snowflake IDs
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Logging setup
pub mod telemetry;
