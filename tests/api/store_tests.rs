//! Store API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use crate::common::TestApp;

#[tokio::test]
async fn test_create_and_list_own_stores() {
    let app = TestApp::new();
    let token = app.signed_in("01011112222").await;
    let other = app.signed_in("01033334444").await;

    let first = app.create_store(&token, "Morning Bakery").await;
    let second = app.create_store(&token, "Evening Bakery").await;
    app.create_store(&other, "Someone Else").await;

    let response = app.get("/users/self/stores/", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<i64> = response
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|store| store["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn test_anonymous_cannot_create_store() {
    let app = TestApp::new();

    let response = app
        .post("/users/self/stores/", json!({"name": "Nobody's"}), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.error(),
        json!({"detail": "Authentication credentials were not provided."})
    );
}

#[test_case("", false ; "empty")]
#[test_case("ab", false ; "two chars")]
#[test_case("abc", true ; "three chars")]
#[test_case(&"x".repeat(32), true ; "thirty two chars")]
#[test_case(&"x".repeat(33), false ; "thirty three chars")]
#[tokio::test]
async fn test_store_name_length(name: &str, accepted: bool) {
    let app = TestApp::new();
    let token = app.signed_in("01011112222").await;

    let response = app
        .post("/users/self/stores/", json!({"name": name}), Some(&token))
        .await;

    if accepted {
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.data()["name"], name);
    } else {
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.error()["name"].is_array());
    }
}

#[tokio::test]
async fn test_store_name_is_trimmed() {
    let app = TestApp::new();
    let token = app.signed_in("01011112222").await;

    let blank = app
        .post("/users/self/stores/", json!({"name": "     "}), Some(&token))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert!(blank.error()["name"].is_array());

    let padded = app
        .post("/users/self/stores/", json!({"name": "  Corner Shop  "}), Some(&token))
        .await;
    assert_eq!(padded.status, StatusCode::CREATED);
    assert_eq!(padded.data()["name"], "Corner Shop");
}

#[tokio::test]
async fn test_owner_retrieves_updates_and_deletes() {
    let app = TestApp::new();
    let token = app.signed_in("01011112222").await;
    let store_id = app.create_store(&token, "Corner Shop").await;
    let uri = format!("/stores/{}/", store_id);

    let response = app.get(&uri, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Corner Shop");

    let response = app
        .patch(&uri, json!({"name": "Corner Cafe"}), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Corner Cafe");

    let response = app.delete(&uri, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(response.body, serde_json::Value::Null);

    let response = app.get(&uri, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_owner_is_forbidden() {
    let app = TestApp::new();
    let owner = app.signed_in("01011112222").await;
    let intruder = app.signed_in("01099998888").await;
    let store_id = app.create_store(&owner, "Corner Shop").await;
    let uri = format!("/stores/{}/", store_id);

    assert_eq!(app.get(&uri, Some(&intruder)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(
        app.patch(&uri, json!({"name": "Mine now"}), Some(&intruder))
            .await
            .status,
        StatusCode::FORBIDDEN
    );
    assert_eq!(app.delete(&uri, Some(&intruder)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get(&uri, None).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_and_malformed_store_ids_are_not_found() {
    let app = TestApp::new();
    let token = app.signed_in("01011112222").await;

    let response = app.get("/stores/123456/", Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), json!({"detail": "Not found."}));

    let response = app.get("/stores/abc/", Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
