//! Custom Extractors
//!
//! Axum extractors for the caller's identity, JSON bodies and path ids.
//! Their rejections are [`AppError`]s so they render like any other client
//! error and pass through the response envelope.

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    RequestPartsExt,
};
use serde::de::DeserializeOwned;

use crate::domain::services::Principal;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<AuthUser>()
            .map_or(Principal::Anonymous, |user| Principal::User(user.user_id)))
    }
}

/// JSON request body. An empty body reads as `{}` so absent fields surface
/// as field errors instead of a parse failure.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(raw)
            .map(JsonBody)
            .map_err(|e| AppError::BadRequest(format!("JSON parse error - {e}")))
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound("Not found.".into()))
}

async fn path_ids(parts: &mut Parts) -> Result<Vec<i64>, AppError> {
    let Path(params) = parts
        .extract::<Path<Vec<(String, String)>>>()
        .await
        .map_err(|_| AppError::NotFound("Not found.".into()))?;

    params.iter().map(|(_, value)| parse_id(value)).collect()
}

/// `{store_id}` from the path. Non-numeric ids resolve to 404.
#[derive(Debug, Clone, Copy)]
pub struct StoreId(pub i64);

impl<S> FromRequestParts<S> for StoreId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match path_ids(parts).await?.as_slice() {
            [store_id, ..] => Ok(StoreId(*store_id)),
            [] => Err(AppError::NotFound("Not found.".into())),
        }
    }
}

/// `{store_id}` and the id of an item inside that store.
#[derive(Debug, Clone, Copy)]
pub struct StoreItemIds(pub i64, pub i64);

impl<S> FromRequestParts<S> for StoreItemIds
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match path_ids(parts).await?.as_slice() {
            [store_id, item_id] => Ok(StoreItemIds(*store_id, *item_id)),
            _ => Err(AppError::NotFound("Not found.".into())),
        }
    }
}
