//! Ownership authorization.
//!
//! Every protected resource resolves to the id of the user who owns it:
//! a store directly, a category or product through its store.

use crate::domain::entities::Store;

/// The caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User(i64),
}

impl Principal {
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

/// Resources that resolve to an owning user.
pub trait OwnerLookup {
    fn owner_id(&self) -> i64;
}

impl OwnerLookup for Store {
    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

/// A store-scoped item paired with the store it was loaded from.
#[derive(Debug, Clone, Copy)]
pub struct InStore<'a, T> {
    pub store: &'a Store,
    pub item: &'a T,
}

impl<'a, T> InStore<'a, T> {
    pub fn new(store: &'a Store, item: &'a T) -> Self {
        Self { store, item }
    }
}

impl<T> OwnerLookup for InStore<'_, T> {
    fn owner_id(&self) -> i64 {
        self.store.owner_id
    }
}

/// Why access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("Authentication credentials were not provided.")]
    Unauthenticated,

    #[error("You do not have permission to perform this action.")]
    Forbidden,
}

/// True iff the principal is authenticated and owns the resource.
pub fn authorize<R: OwnerLookup + ?Sized>(principal: Principal, resource: &R) -> bool {
    principal.user_id() == Some(resource.owner_id())
}

/// Like [`authorize`], reporting which check failed.
pub fn ensure_owner<R: OwnerLookup + ?Sized>(
    principal: Principal,
    resource: &R,
) -> Result<(), AccessDenied> {
    match principal {
        Principal::Anonymous => Err(AccessDenied::Unauthenticated),
        Principal::User(_) if authorize(principal, resource) => Ok(()),
        Principal::User(_) => Err(AccessDenied::Forbidden),
    }
}

/// Require an authenticated caller, returning its user id.
pub fn ensure_authenticated(principal: Principal) -> Result<i64, AccessDenied> {
    principal.user_id().ok_or(AccessDenied::Unauthenticated)
}
