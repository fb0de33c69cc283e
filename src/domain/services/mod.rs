//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong
//! to a single entity.
//!
//! - **chosung**: Hangul initial-consonant transliteration for product search
//! - **ownership**: owner-only access checks along the Product/Category → Store → User chain

pub mod chosung;
pub mod ownership;

pub use ownership::{authorize, ensure_authenticated, ensure_owner, AccessDenied, InStore, OwnerLookup, Principal};
