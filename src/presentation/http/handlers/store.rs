//! Store Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{CreateStoreRequest, UpdateStoreRequest};
use crate::application::dto::response::StoreResponse;
use crate::application::services::StoreService;
use crate::domain::services::Principal;
use crate::presentation::http::extractors::{JsonBody, StoreId};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Stores owned by the caller, newest first
pub async fn list_my_stores(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<StoreResponse>>, AppError> {
    let stores = state.store_service().list(principal).await?;

    Ok(Json(stores.into_iter().map(StoreResponse::from).collect()))
}

pub async fn create_store(
    State(state): State<AppState>,
    principal: Principal,
    JsonBody(body): JsonBody<CreateStoreRequest>,
) -> Result<(StatusCode, Json<StoreResponse>), AppError> {
    let store = state.store_service().create(principal, body).await?;

    Ok((StatusCode::CREATED, Json(store.into())))
}

pub async fn get_store(
    State(state): State<AppState>,
    principal: Principal,
    StoreId(store_id): StoreId,
) -> Result<Json<StoreResponse>, AppError> {
    let store = state.store_service().retrieve(principal, store_id).await?;

    Ok(Json(store.into()))
}

pub async fn update_store(
    State(state): State<AppState>,
    principal: Principal,
    StoreId(store_id): StoreId,
    JsonBody(body): JsonBody<UpdateStoreRequest>,
) -> Result<Json<StoreResponse>, AppError> {
    let store = state
        .store_service()
        .update(principal, store_id, body)
        .await?;

    Ok(Json(store.into()))
}

/// Delete a store with everything in it
pub async fn delete_store(
    State(state): State<AppState>,
    principal: Principal,
    StoreId(store_id): StoreId,
) -> Result<StatusCode, AppError> {
    state.store_service().delete(principal, store_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
