//! User Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::RegisterRequest;
use crate::application::dto::response::UserResponse;
use crate::application::services::UserService;
use crate::presentation::http::extractors::JsonBody;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.user_service().register(body).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}
