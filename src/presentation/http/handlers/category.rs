//! Category Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::application::dto::response::CategoryResponse;
use crate::application::services::CategoryService;
use crate::domain::services::Principal;
use crate::presentation::http::extractors::{JsonBody, StoreId, StoreItemIds};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_categories(
    State(state): State<AppState>,
    principal: Principal,
    StoreId(store_id): StoreId,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.category_service().list(principal, store_id).await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

pub async fn create_category(
    State(state): State<AppState>,
    principal: Principal,
    StoreId(store_id): StoreId,
    JsonBody(body): JsonBody<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let category = state
        .category_service()
        .create(principal, store_id, body)
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

pub async fn get_category(
    State(state): State<AppState>,
    principal: Principal,
    StoreItemIds(store_id, category_id): StoreItemIds,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = state
        .category_service()
        .retrieve(principal, store_id, category_id)
        .await?;

    Ok(Json(category.into()))
}

pub async fn update_category(
    State(state): State<AppState>,
    principal: Principal,
    StoreItemIds(store_id, category_id): StoreItemIds,
    JsonBody(body): JsonBody<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = state
        .category_service()
        .update(principal, store_id, category_id, body)
        .await?;

    Ok(Json(category.into()))
}

/// Delete a category; its products go with it
pub async fn delete_category(
    State(state): State<AppState>,
    principal: Principal,
    StoreItemIds(store_id, category_id): StoreItemIds,
) -> Result<StatusCode, AppError> {
    state
        .category_service()
        .delete(principal, store_id, category_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
