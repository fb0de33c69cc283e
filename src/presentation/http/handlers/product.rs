//! Product Handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{
    CreateProductRequest, ProductListQuery, UpdateProductRequest,
};
use crate::application::dto::response::{PageResponse, ProductResponse};
use crate::application::services::ProductService;
use crate::domain::services::Principal;
use crate::presentation::http::extractors::{JsonBody, StoreId, StoreItemIds};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// One page of products, optionally filtered by `search`
pub async fn list_products(
    State(state): State<AppState>,
    principal: Principal,
    StoreId(store_id): StoreId,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<PageResponse<ProductResponse>>, AppError> {
    let page = state
        .product_service()
        .list(
            principal,
            store_id,
            query.search.as_deref(),
            query.cursor.as_deref(),
        )
        .await?;

    Ok(Json(page.into()))
}

pub async fn create_product(
    State(state): State<AppState>,
    principal: Principal,
    StoreId(store_id): StoreId,
    JsonBody(body): JsonBody<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = state
        .product_service()
        .create(principal, store_id, body)
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

pub async fn get_product(
    State(state): State<AppState>,
    principal: Principal,
    StoreItemIds(store_id, product_id): StoreItemIds,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .product_service()
        .retrieve(principal, store_id, product_id)
        .await?;

    Ok(Json(product.into()))
}

/// Partial update; absent fields keep their values
pub async fn update_product(
    State(state): State<AppState>,
    principal: Principal,
    StoreItemIds(store_id, product_id): StoreItemIds,
    JsonBody(body): JsonBody<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .product_service()
        .update(principal, store_id, product_id, body)
        .await?;

    Ok(Json(product.into()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    principal: Principal,
    StoreItemIds(store_id, product_id): StoreItemIds,
) -> Result<StatusCode, AppError> {
    state
        .product_service()
        .delete(principal, store_id, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
