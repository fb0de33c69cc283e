//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Domain event counters (registrations, stores, products, tokens)

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "storefront";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

pub static USERS_REGISTERED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("users_registered_total", "Number of user registrations").namespace(NAMESPACE),
    )
    .expect("Failed to create USERS_REGISTERED_TOTAL metric")
});

pub static STORES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("stores_created_total", "Number of stores created").namespace(NAMESPACE),
    )
    .expect("Failed to create STORES_CREATED_TOTAL metric")
});

pub static PRODUCTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("products_created_total", "Number of products created").namespace(NAMESPACE),
    )
    .expect("Failed to create PRODUCTS_CREATED_TOTAL metric")
});

/// Tokens issued, labelled `access` or `refresh`
pub static TOKENS_ISSUED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("tokens_issued_total", "Number of JWTs issued").namespace(NAMESPACE),
        &["kind"],
    )
    .expect("Failed to create TOKENS_ISSUED_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(USERS_REGISTERED_TOTAL.clone()))
        .expect("Failed to register USERS_REGISTERED_TOTAL");
    registry
        .register(Box::new(STORES_CREATED_TOTAL.clone()))
        .expect("Failed to register STORES_CREATED_TOTAL");
    registry
        .register(Box::new(PRODUCTS_CREATED_TOTAL.clone()))
        .expect("Failed to register PRODUCTS_CREATED_TOTAL");
    registry
        .register(Box::new(TOKENS_ISSUED_TOTAL.clone()))
        .expect("Failed to register TOKENS_ISSUED_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn record_user_registered() {
    USERS_REGISTERED_TOTAL.inc();
}

pub fn record_store_created() {
    STORES_CREATED_TOTAL.inc();
}

pub fn record_product_created() {
    PRODUCTS_CREATED_TOTAL.inc();
}

pub fn record_token_issued(kind: &str) {
    TOKENS_ISSUED_TOTAL.with_label_values(&[kind]).inc();
}
