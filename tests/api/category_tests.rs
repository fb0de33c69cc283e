//! Category API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_category_lifecycle() {
    let app = TestApp::new();
    let token = app.signed_in("01011112222").await;
    let store_id = app.create_store(&token, "Tea House").await;

    let category_id = app.create_category(&token, store_id, "Drinks").await;
    let uri = format!("/stores/{}/categories/{}/", store_id, category_id);

    let response = app
        .get(&format!("/stores/{}/categories/", store_id), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.data(),
        &json!([{"id": category_id, "store": store_id, "name": "Drinks"}])
    );

    let response = app.patch(&uri, json!({"name": "Beverages"}), Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Beverages");

    assert_eq!(app.delete(&uri, Some(&token)).await.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri, Some(&token)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_name_unique_per_store() {
    let app = TestApp::new();
    let token = app.signed_in("01011112222").await;
    let first = app.create_store(&token, "Tea House").await;
    let second = app.create_store(&token, "Coffee House").await;
    app.create_category(&token, first, "Drinks").await;

    let response = app
        .post(
            &format!("/stores/{}/categories/", first),
            json!({"name": "Drinks"}),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error(),
        json!({"name": ["category with this name already exists in the store."]})
    );

    app.create_category(&token, second, "Drinks").await;
}

#[tokio::test]
async fn test_category_scoped_to_its_store() {
    let app = TestApp::new();
    let token = app.signed_in("01011112222").await;
    let first = app.create_store(&token, "Tea House").await;
    let second = app.create_store(&token, "Coffee House").await;
    let category_id = app.create_category(&token, first, "Drinks").await;

    let response = app
        .get(
            &format!("/stores/{}/categories/{}/", second, category_id),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_owner_cannot_list_categories() {
    let app = TestApp::new();
    let owner = app.signed_in("01011112222").await;
    let intruder = app.signed_in("01099998888").await;
    let store_id = app.create_store(&owner, "Tea House").await;
    let uri = format!("/stores/{}/categories/", store_id);

    assert_eq!(app.get(&uri, Some(&intruder)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get(&uri, None).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        app.get("/stores/987654/categories/", Some(&owner)).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_deleting_category_removes_its_products() {
    let app = TestApp::new();
    let token = app.signed_in("01011112222").await;
    let store_id = app.create_store(&token, "Tea House").await;
    let category_id = app.create_category(&token, store_id, "Drinks").await;
    let created = app
        .create_product(&token, store_id, category_id, "Milk Tea")
        .await;
    let product_id = created.data()["id"].as_i64().unwrap();

    app.delete(
        &format!("/stores/{}/categories/{}/", store_id, category_id),
        Some(&token),
    )
    .await;

    let response = app
        .get(
            &format!("/stores/{}/products/{}/", store_id, product_id),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
