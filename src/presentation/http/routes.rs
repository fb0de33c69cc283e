//! Route Configuration
//!
//! API routes are enveloped and authenticated; probes and metrics are not.

use axum::{
    http::header,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, envelope_middleware, track_metrics};
use crate::startup::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(api_routes(state.clone()))
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        metrics::gather_metrics(),
    )
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(account_routes())
        .merge(store_routes())
        .merge(category_routes())
        .merge(product_routes())
        // Envelope is outermost so authentication failures are wrapped too
        .layer(middleware::from_fn_with_state(state, auth_middleware))
        .layer(middleware::from_fn(envelope_middleware))
}

/// Registration and token endpoints
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/users/", post(handlers::user::register))
        .route("/auth/tokens/", post(handlers::auth::obtain_token_pair))
        .route("/auth/tokens/refresh/", post(handlers::auth::refresh_token))
        .route("/auth/tokens/blacklist/", post(handlers::auth::blacklist_token))
}

fn store_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/self/stores/",
            get(handlers::store::list_my_stores).post(handlers::store::create_store),
        )
        .route(
            "/stores/{store_id}/",
            get(handlers::store::get_store)
                .patch(handlers::store::update_store)
                .delete(handlers::store::delete_store),
        )
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/stores/{store_id}/categories/",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/stores/{store_id}/categories/{category_id}/",
            get(handlers::category::get_category)
                .patch(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/stores/{store_id}/products/",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/stores/{store_id}/products/{product_id}/",
            get(handlers::product::get_product)
                .patch(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
}
