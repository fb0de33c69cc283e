//! Common Test Utilities
//!
//! A router over the in-memory backend plus request and fixture helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront_api::config::{
    CorsSettings, DatabaseSettings, JwtSettings, PasswordSettings, ServerSettings, Settings,
    SnowflakeSettings, StorageBackend, StorageSettings,
};
use storefront_api::infrastructure::memory::MemoryDatabase;
use storefront_api::startup::{build_router, AppState, Repositories};

pub const TEST_PASSWORD: &str = "Sup3r-secret!";

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://localhost/storefront_test".into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: 1,
            run_migrations: false,
        },
        storage: StorageSettings {
            backend: StorageBackend::Memory,
        },
        jwt: JwtSettings {
            secret: "integration-test-secret-with-32-plus-chars".into(),
            access_token_lifetime_minutes: 60,
            refresh_token_lifetime_days: 7,
        },
        password: PasswordSettings {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        snowflake: SnowflakeSettings { machine_id: 7 },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        environment: "test".into(),
    }
}

/// Status plus decoded JSON body (`null` when empty)
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn code(&self) -> u64 {
        self.body["meta"]["code"].as_u64().unwrap_or_default()
    }

    pub fn message(&self) -> &str {
        self.body["meta"]["message"].as_str().unwrap_or_default()
    }

    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// `meta.message` of a client error parsed back into JSON
    pub fn error(&self) -> Value {
        serde_json::from_str(self.message()).unwrap_or(Value::Null)
    }
}

/// Test application over a fresh in-memory database
pub struct TestApp {
    pub router: Router,
    pub db: Arc<MemoryDatabase>,
}

impl TestApp {
    pub fn new() -> Self {
        let db = Arc::new(MemoryDatabase::new());
        let state = AppState::new(test_settings(), Repositories::memory(db.clone()), None)
            .expect("test settings are valid");

        Self {
            router: build_router(state),
            db,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, uri, body.map(|value| value.to_string()), token)
            .await
    }

    /// POST a raw, possibly malformed, JSON body.
    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(body.to_string()), None).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let body = match body {
            Some(raw) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(raw)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, None, token).await
    }

    pub async fn post(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request(Method::POST, uri, Some(body), token).await
    }

    pub async fn patch(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body), token).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, None, token).await
    }

    /// Register an account and return its id.
    pub async fn register(&self, phone: &str) -> i64 {
        let response = self
            .post(
                "/users/",
                json!({"phone": phone, "password": TEST_PASSWORD, "password2": TEST_PASSWORD}),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["id"].as_i64().unwrap()
    }

    /// Obtain a token pair, returning `(access, refresh)`.
    pub async fn tokens(&self, phone: &str) -> (String, String) {
        let response = self
            .post(
                "/auth/tokens/",
                json!({"phone": phone, "password": TEST_PASSWORD}),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        (
            response.data()["access"].as_str().unwrap().to_string(),
            response.data()["refresh"].as_str().unwrap().to_string(),
        )
    }

    /// Register an account and return an access token for it.
    pub async fn signed_in(&self, phone: &str) -> String {
        self.register(phone).await;
        self.tokens(phone).await.0
    }

    pub async fn create_store(&self, token: &str, name: &str) -> i64 {
        let response = self
            .post("/users/self/stores/", json!({"name": name}), Some(token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["id"].as_i64().unwrap()
    }

    pub async fn create_category(&self, token: &str, store_id: i64, name: &str) -> i64 {
        let response = self
            .post(
                &format!("/stores/{}/categories/", store_id),
                json!({"name": name}),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["id"].as_i64().unwrap()
    }

    pub async fn create_product(
        &self,
        token: &str,
        store_id: i64,
        category_id: i64,
        name: &str,
    ) -> TestResponse {
        self.post(
            &format!("/stores/{}/products/", store_id),
            product_body(category_id, name),
            Some(token),
        )
        .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

pub fn product_body(category_id: i64, name: &str) -> Value {
    json!({
        "category": category_id,
        "price": 4500,
        "cost": 1200,
        "name": name,
        "description": "Fresh from the counter",
        "barcode": "8801234567890",
        "sell_by_days": 3,
        "size": "small"
    })
}
