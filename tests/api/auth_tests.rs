//! Token API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

const PHONE: &str = "01055550000";

#[tokio::test]
async fn test_obtain_token_pair() {
    let app = TestApp::new();
    app.register(PHONE).await;

    let (access, refresh) = app.tokens(PHONE).await;

    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
    assert_ne!(access, refresh);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.register(PHONE).await;

    let response = app
        .post("/auth/tokens/", json!({"phone": PHONE, "password": "nope"}), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), 401);
    assert_eq!(
        response.error(),
        json!({"detail": "No active account found with the given credentials"})
    );
}

#[tokio::test]
async fn test_obtain_requires_fields() {
    let app = TestApp::new();

    let response = app.post("/auth/tokens/", json!({}), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error()["phone"], json!(["This field is required."]));
    assert_eq!(response.error()["password"], json!(["This field is required."]));
}

#[tokio::test]
async fn test_refresh_returns_access_only() {
    let app = TestApp::new();
    app.register(PHONE).await;
    let (_, refresh) = app.tokens(PHONE).await;

    let response = app
        .post("/auth/tokens/refresh/", json!({"refresh": refresh}), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["access"].is_string());
    assert!(response.data().get("refresh").is_none());
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let app = TestApp::new();
    app.register(PHONE).await;
    let (access, _) = app.tokens(PHONE).await;

    let response = app
        .post("/auth/tokens/refresh/", json!({"refresh": access}), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blacklisted_refresh_is_rejected() {
    let app = TestApp::new();
    app.register(PHONE).await;
    let (_, refresh) = app.tokens(PHONE).await;

    let response = app
        .post("/auth/tokens/blacklist/", json!({"refresh": refresh}), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data(), &json!({}));

    let response = app
        .post("/auth/tokens/refresh/", json!({"refresh": refresh}), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .post("/auth/tokens/blacklist/", json!({"refresh": refresh}), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_bearer_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app.get("/users/self/stores/", Some("not-a-jwt")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), 401);
    assert_eq!(response.data(), &serde_json::Value::Null);
}
