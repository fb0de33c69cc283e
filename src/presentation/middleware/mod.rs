//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;
pub mod envelope;
pub mod logging;
pub mod metrics;

pub use auth::{auth_middleware, AuthUser};
pub use envelope::envelope_middleware;
pub use metrics::track_metrics;
