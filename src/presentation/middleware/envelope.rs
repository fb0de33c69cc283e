//! Response Envelope
//!
//! Every API response leaves as `{"meta": {"code", "message"}, "data"}`.
//! Successful bodies move into `data`; client error bodies are rendered as
//! JSON text into `meta.message`; server errors never expose their body.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use serde_json::Value;

const SERVER_ERROR_MESSAGE: &str = "server error";

#[derive(Debug, Serialize)]
pub struct Meta {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub meta: Meta,
    pub data: Value,
}

impl Envelope {
    /// Wrap a response body. `None` means the status is passed through as is.
    pub fn wrap(status: StatusCode, body: Value) -> Option<Self> {
        if status == StatusCode::NO_CONTENT {
            return None;
        }

        let code = status.as_u16();
        let (message, data) = if status.is_success() {
            ("ok".to_string(), body)
        } else if status.is_client_error() {
            (body.to_string(), Value::Null)
        } else if status.is_server_error() {
            (SERVER_ERROR_MESSAGE.to_string(), Value::Null)
        } else {
            return None;
        };

        Some(Self {
            meta: Meta { code, message },
            data,
        })
    }
}

/// Interpret raw response bytes: empty is `null`, invalid JSON a string.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Wrap the handler's response in the envelope.
pub async fn envelope_middleware(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    let passes_through = status == StatusCode::NO_CONTENT
        || status.is_informational()
        || status.is_redirection();
    if passes_through {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let body = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => parse_body(&bytes),
        Err(e) => {
            tracing::error!("Failed to read response body: {}", e);
            Value::Null
        }
    };

    let Some(envelope) = Envelope::wrap(status, body) else {
        return Response::from_parts(parts, Body::empty());
    };

    let bytes = match serde_json::to_vec(&envelope) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to serialize envelope: {}", e);
            parts.status = StatusCode::INTERNAL_SERVER_ERROR;
            br#"{"meta":{"code":500,"message":"server error"},"data":null}"#.to_vec()
        }
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, Body::from(bytes))
}
