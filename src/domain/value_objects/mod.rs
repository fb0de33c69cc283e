//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **SortKey / KeysetQuery**: positions and windows in reverse-chronological listings

mod keyset;

pub use keyset::*;
