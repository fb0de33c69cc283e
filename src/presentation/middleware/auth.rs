//! Authentication Middleware
//!
//! Resolves the bearer access token, when one is sent, into an [`AuthUser`]
//! request extension. Requests without an `Authorization` header continue
//! anonymously; ownership checks in the services decide whether that is
//! enough. A header that is present but unusable is rejected with 401.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::application::services::AuthService;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Authenticate the caller if credentials were supplied.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .typed_try_get::<Authorization<Bearer>>()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".into()))?;

    if let Some(Authorization(bearer)) = bearer {
        let user_id = state.auth_service().authenticate(bearer.token()).await?;
        tracing::debug!(user_id, "Request authenticated");
        request.extensions_mut().insert(AuthUser { user_id });
    }

    Ok(next.run(request).await)
}
