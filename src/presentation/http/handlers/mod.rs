//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod category;
pub mod health;
pub mod product;
pub mod store;
pub mod user;
