//! Store Service
//!
//! Store management for the authenticated owner.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use validator::Validate;

use crate::application::dto::request::{CreateStoreRequest, UpdateStoreRequest};
use crate::domain::services::ownership::{ensure_authenticated, ensure_owner, AccessDenied, Principal};
use crate::domain::{Store, StoreRepository};
use crate::infrastructure::metrics;
use crate::shared::error::{AppError, FieldErrors};
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::{field_errors, required};

/// Store service trait
#[async_trait]
pub trait StoreService: Send + Sync {
    /// Create a store owned by the caller
    async fn create(&self, principal: Principal, request: CreateStoreRequest) -> Result<Store, StoreError>;

    /// List the caller's stores, newest first
    async fn list(&self, principal: Principal) -> Result<Vec<Store>, StoreError>;

    async fn retrieve(&self, principal: Principal, store_id: i64) -> Result<Store, StoreError>;

    async fn update(
        &self,
        principal: Principal,
        store_id: i64,
        request: UpdateStoreRequest,
    ) -> Result<Store, StoreError>;

    /// Delete a store and everything in it
    async fn delete(&self, principal: Principal, store_id: i64) -> Result<(), StoreError>;
}

/// Errors shared by the store-scoped services
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not found.")]
    NotFound,

    #[error(transparent)]
    Denied(#[from] AccessDenied),

    #[error("Invalid input: {0:?}")]
    Validation(FieldErrors),

    #[error("Invalid cursor")]
    InvalidCursor,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound("Not found.".into()),
            StoreError::InvalidCursor => AppError::NotFound("Invalid cursor".into()),
            StoreError::Denied(denied @ AccessDenied::Unauthenticated) => {
                AppError::Unauthorized(denied.to_string())
            }
            StoreError::Denied(denied @ AccessDenied::Forbidden) => {
                AppError::Forbidden(denied.to_string())
            }
            StoreError::Validation(errors) => AppError::Validation(errors),
            StoreError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AppError> for StoreError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(errors) => StoreError::Validation(errors),
            AppError::NotFound(_) => StoreError::NotFound,
            other => StoreError::Internal(other.to_string()),
        }
    }
}

/// Run request validation, mapping failures to field errors.
pub(crate) fn validate_request<T: Validate>(request: &T) -> Result<(), StoreError> {
    request
        .validate()
        .map_err(|e| StoreError::Validation(field_errors(&e)))
}

/// Load a store the caller must own: missing first, then ownership.
pub(crate) async fn owned_store<S>(
    stores: &S,
    principal: Principal,
    store_id: i64,
) -> Result<Store, StoreError>
where
    S: StoreRepository + ?Sized,
{
    let store = stores.find_by_id(store_id).await?.ok_or(StoreError::NotFound)?;
    ensure_owner(principal, &store)?;
    Ok(store)
}

/// StoreService implementation
pub struct StoreServiceImpl<S: ?Sized> {
    store_repo: Arc<S>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<S: StoreRepository + ?Sized> StoreServiceImpl<S> {
    pub fn new(store_repo: Arc<S>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            store_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl<S: StoreRepository + ?Sized + 'static> StoreService for StoreServiceImpl<S> {
    async fn create(&self, principal: Principal, request: CreateStoreRequest) -> Result<Store, StoreError> {
        let owner_id = ensure_authenticated(principal)?;
        validate_request(&request)?;

        let store = Store::new(
            self.id_generator.generate(),
            owner_id,
            required(request.name, "name")?,
        );
        let created = self.store_repo.create(&store).await?;

        metrics::record_store_created();
        tracing::info!(store_id = created.id, owner_id, "Store created");

        Ok(created)
    }

    async fn list(&self, principal: Principal) -> Result<Vec<Store>, StoreError> {
        let owner_id = ensure_authenticated(principal)?;
        Ok(self.store_repo.find_by_owner(owner_id).await?)
    }

    async fn retrieve(&self, principal: Principal, store_id: i64) -> Result<Store, StoreError> {
        owned_store(&*self.store_repo, principal, store_id).await
    }

    async fn update(
        &self,
        principal: Principal,
        store_id: i64,
        request: UpdateStoreRequest,
    ) -> Result<Store, StoreError> {
        let mut store = owned_store(&*self.store_repo, principal, store_id).await?;
        validate_request(&request)?;

        let Some(name) = request.name else {
            return Ok(store);
        };
        store.name = name;
        store.updated_at = Utc::now();

        Ok(self.store_repo.update(&store).await?)
    }

    async fn delete(&self, principal: Principal, store_id: i64) -> Result<(), StoreError> {
        let store = owned_store(&*self.store_repo, principal, store_id).await?;
        self.store_repo.delete(store.id).await?;

        tracing::info!(store_id, "Store deleted");
        Ok(())
    }
}
