//! Registration API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_register_returns_id_and_phone() {
    let app = TestApp::new();

    let response = app
        .post(
            "/users/",
            json!({"phone": "01012345678", "password": TEST_PASSWORD, "password2": TEST_PASSWORD}),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.code(), 201);
    assert_eq!(response.message(), "ok");
    assert_eq!(response.data()["phone"], "01012345678");
    assert!(response.data()["id"].as_i64().is_some());
    assert!(response.data().get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_phone() {
    let app = TestApp::new();
    app.register("01012345678").await;

    let response = app
        .post(
            "/users/",
            json!({"phone": "01012345678", "password": TEST_PASSWORD, "password2": TEST_PASSWORD}),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.data(), &serde_json::Value::Null);
    assert_eq!(
        response.error(),
        json!({"phone": ["user with this phone already exists."]})
    );
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let app = TestApp::new();

    let response = app
        .post(
            "/users/",
            json!({"phone": "01012345678", "password": TEST_PASSWORD, "password2": "different"}),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error()["password2"],
        json!(["Password fields didn't match."])
    );
}

#[tokio::test]
async fn test_register_invalid_phone() {
    let app = TestApp::new();

    let response = app
        .post(
            "/users/",
            json!({"phone": "02-123-4567", "password": TEST_PASSWORD, "password2": TEST_PASSWORD}),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error()["phone"], json!(["Enter a valid phone number."]));
}

#[tokio::test]
async fn test_register_empty_body_lists_required_fields() {
    let app = TestApp::new();

    let response = app
        .request(axum::http::Method::POST, "/users/", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let errors = response.error();
    for field in ["phone", "password", "password2"] {
        assert_eq!(errors[field], json!(["This field is required."]), "{field}");
    }
}

#[tokio::test]
async fn test_malformed_json_is_enveloped_bad_request() {
    let app = TestApp::new();

    let response = app.post_raw("/users/", "{not json").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), 400);
    assert!(response.error()["detail"]
        .as_str()
        .unwrap()
        .starts_with("JSON parse error"));
}
