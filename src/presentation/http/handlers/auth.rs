//! Token Handlers
//!
//! Obtain, refresh and revoke JWT token pairs.

use axum::{extract::State, Json};
use validator::Validate;

use crate::application::dto::request::{ObtainTokenRequest, RefreshTokenRequest};
use crate::application::dto::response::{AccessTokenResponse, EmptyResponse, TokenPairResponse};
use crate::application::services::AuthService;
use crate::presentation::http::extractors::JsonBody;
use crate::shared::error::AppError;
use crate::shared::validation::{required, validation_error};
use crate::startup::AppState;

/// Exchange phone and password for an access/refresh pair
pub async fn obtain_token_pair(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ObtainTokenRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    body.validate().map_err(validation_error)?;
    let phone = required(body.phone, "phone")?;
    let password = required(body.password, "password")?;

    let pair = state.auth_service().obtain_pair(&phone, &password).await?;

    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

/// Issue a fresh access token
pub async fn refresh_token(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    body.validate().map_err(validation_error)?;
    let refresh = required(body.refresh, "refresh")?;

    let access = state.auth_service().refresh(&refresh).await?;

    Ok(Json(AccessTokenResponse { access }))
}

/// Revoke a refresh token
pub async fn blacklist_token(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RefreshTokenRequest>,
) -> Result<Json<EmptyResponse>, AppError> {
    body.validate().map_err(validation_error)?;
    let refresh = required(body.refresh, "refresh")?;

    state.auth_service().blacklist(&refresh).await?;

    Ok(Json(EmptyResponse::default()))
}
