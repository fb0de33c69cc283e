//! Product API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{product_body, TestApp};

struct Shop {
    app: TestApp,
    token: String,
    store_id: i64,
    category_id: i64,
}

async fn shop() -> Shop {
    let app = TestApp::new();
    let token = app.signed_in("01011112222").await;
    let store_id = app.create_store(&token, "Dessert Cafe").await;
    let category_id = app.create_category(&token, store_id, "Drinks").await;

    Shop {
        app,
        token,
        store_id,
        category_id,
    }
}

impl Shop {
    fn list_uri(&self) -> String {
        format!("/stores/{}/products/", self.store_id)
    }

    async fn add(&self, name: &str) -> i64 {
        let response = self
            .app
            .create_product(&self.token, self.store_id, self.category_id, name)
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["id"].as_i64().unwrap()
    }

    async fn names(&self, query: &str) -> Vec<String> {
        let response = self
            .app
            .get(&format!("{}{}", self.list_uri(), query), Some(&self.token))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.data()["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|product| product["name"].as_str().unwrap().to_string())
            .collect()
    }
}

#[tokio::test]
async fn test_create_product_fills_chosung() {
    let shop = shop().await;

    let response = shop
        .app
        .create_product(&shop.token, shop.store_id, shop.category_id, "슈크림 라떼")
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = response.data();
    assert_eq!(data["chosung"], "ㅅㅋㄹ ㄹㄸ");
    assert_eq!(data["store"], shop.store_id);
    assert_eq!(data["category"], shop.category_id);
    assert_eq!(data["size"], "small");
    assert_eq!(data["price"], 4500);
}

#[tokio::test]
async fn test_create_product_requires_fields() {
    let shop = shop().await;

    let response = shop
        .app
        .post(&shop.list_uri(), json!({"name": "Latte"}), Some(&shop.token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let errors = response.error();
    for field in ["category", "price", "cost", "description", "barcode", "sell_by_days", "size"] {
        assert_eq!(errors[field], json!(["This field is required."]), "{field}");
    }
    assert!(errors.get("name").is_none());
}

#[tokio::test]
async fn test_product_rejects_foreign_category() {
    let shop = shop().await;
    let other_store = shop.app.create_store(&shop.token, "Second Cafe").await;
    let foreign = shop
        .app
        .create_category(&shop.token, other_store, "Snacks")
        .await;

    let response = shop
        .app
        .post(&shop.list_uri(), product_body(foreign, "Latte"), Some(&shop.token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error()["category"].is_array());
}

#[tokio::test]
async fn test_product_name_unique_within_store_only() {
    let shop = shop().await;
    shop.add("Latte").await;

    let response = shop
        .app
        .create_product(&shop.token, shop.store_id, shop.category_id, "Latte")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error(),
        json!({"name": ["product with this name already exists in the store."]})
    );

    let other_store = shop.app.create_store(&shop.token, "Second Cafe").await;
    let other_category = shop
        .app
        .create_category(&shop.token, other_store, "Drinks")
        .await;
    let response = shop
        .app
        .create_product(&shop.token, other_store, other_category, "Latte")
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_size_is_rejected() {
    let shop = shop().await;
    let mut body = product_body(shop.category_id, "Latte");
    body["size"] = json!("medium");

    let response = shop.app.post(&shop.list_uri(), body, Some(&shop.token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error()["size"], json!(["\"medium\" is not a valid choice."]));
}

#[tokio::test]
async fn test_search_by_name_and_chosung() {
    let shop = shop().await;
    for name in ["슈크림 라떼", "슈크림 빵", "아메리카노", "Vanilla Latte"] {
        shop.add(name).await;
    }

    assert_eq!(shop.names("").await.len(), 4);
    assert_eq!(shop.names("?search=").await.len(), 4);
    assert_eq!(shop.names("?search=%EC%8A%88%ED%81%AC%EB%A6%BC").await.len(), 2);
    assert_eq!(shop.names("?search=%E3%85%85%E3%85%8B%E3%84%B9").await.len(), 2);
    assert_eq!(shop.names("?search=latte").await, vec!["Vanilla Latte".to_string()]);
}

#[tokio::test]
async fn test_cursor_pagination_over_eleven_products() {
    let shop = shop().await;
    for i in 0..11 {
        shop.add(&format!("Item {i:02}")).await;
    }

    let first = shop.app.get(&shop.list_uri(), Some(&shop.token)).await;
    assert_eq!(first.data()["results"].as_array().unwrap().len(), 10);
    assert_eq!(first.data()["previous"], Value::Null);
    assert_eq!(first.data()["results"][0]["name"], "Item 10");
    let next = first.data()["next"].as_str().unwrap().to_string();

    let second = shop
        .app
        .get(&format!("{}?cursor={}", shop.list_uri(), next), Some(&shop.token))
        .await;
    assert_eq!(second.data()["results"].as_array().unwrap().len(), 1);
    assert_eq!(second.data()["results"][0]["name"], "Item 00");
    assert_eq!(second.data()["next"], Value::Null);
    let previous = second.data()["previous"].as_str().unwrap().to_string();

    let back = shop
        .app
        .get(&format!("{}?cursor={}", shop.list_uri(), previous), Some(&shop.token))
        .await;
    assert_eq!(back.data()["results"], first.data()["results"]);
    assert_eq!(back.data()["previous"], Value::Null);
}

#[tokio::test]
async fn test_invalid_cursor_is_not_found() {
    let shop = shop().await;

    let response = shop
        .app
        .get(&format!("{}?cursor=garbage", shop.list_uri()), Some(&shop.token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), json!({"detail": "Invalid cursor"}));
}

#[tokio::test]
async fn test_partial_update_recomputes_chosung() {
    let shop = shop().await;
    let product_id = shop.add("Latte").await;
    let uri = format!("/stores/{}/products/{}/", shop.store_id, product_id);

    let response = shop
        .app
        .patch(&uri, json!({"name": "바닐라 라떼"}), Some(&shop.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "바닐라 라떼");
    assert_eq!(response.data()["chosung"], "ㅂㄴㄹ ㄹㄸ");
    assert_eq!(response.data()["price"], 4500);
}

#[tokio::test]
async fn test_non_owner_product_access() {
    let shop = shop().await;
    let product_id = shop.add("Latte").await;
    let intruder = shop.app.signed_in("01099998888").await;
    let uri = format!("/stores/{}/products/{}/", shop.store_id, product_id);

    assert_eq!(shop.app.get(&uri, Some(&intruder)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(
        shop.app
            .patch(&uri, json!({"price": 1}), Some(&intruder))
            .await
            .status,
        StatusCode::FORBIDDEN
    );
    assert_eq!(shop.app.delete(&uri, Some(&intruder)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(shop.app.get(&uri, None).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        shop.app.get(&shop.list_uri(), Some(&intruder)).await.status,
        StatusCode::FORBIDDEN
    );

    assert_eq!(shop.app.delete(&uri, Some(&shop.token)).await.status, StatusCode::NO_CONTENT);
}
