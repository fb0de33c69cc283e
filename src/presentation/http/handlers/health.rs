//! Health Check Handlers
//!
//! Probe endpoints for orchestrators. Served outside the response envelope.
//!
//! - `GET /health`: process is up, with version
//! - `GET /health/live`: liveness
//! - `GET /health/ready`: readiness; 503 when the database is unreachable

use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use sqlx::PgPool;

use crate::config::StorageBackend;
use crate::startup::AppState;

static STARTED: Lazy<(Instant, DateTime<Utc>)> = Lazy::new(|| (Instant::now(), Utc::now()));

/// Database round-trips slower than this report `degraded`.
const SLOW_QUERY: Duration = Duration::from_millis(100);

/// Pin the start time used for uptime reporting.
pub fn init_server_start() {
    Lazy::force(&STARTED);
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn http_status(self) -> StatusCode {
        match self {
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
            HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
}

/// Outcome of probing one dependency
#[derive(Debug, Serialize)]
pub struct Check {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Check {
    fn timed(elapsed: Duration) -> Self {
        Self {
            status: if elapsed < SLOW_QUERY {
                HealthStatus::Healthy
            } else {
                HealthStatus::Degraded
            },
            latency_ms: Some(elapsed.as_millis() as u64),
            message: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some(message),
        }
    }

    fn skipped(message: &str) -> Self {
        Self {
            status: HealthStatus::Healthy,
            latency_ms: None,
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Readiness {
    pub status: HealthStatus,
    pub version: &'static str,
    pub storage: StorageBackend,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub database: Check,
}

pub async fn health_check() -> Json<StatusBody> {
    Json(StatusBody {
        status: "healthy",
        version: Some(env!("CARGO_PKG_VERSION")),
    })
}

pub async fn liveness() -> Json<StatusBody> {
    Json(StatusBody {
        status: "alive",
        version: None,
    })
}

pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let database = match &state.db {
        Some(pool) => ping(pool).await,
        None => Check::skipped("in-memory storage"),
    };

    let (started, started_at) = &*STARTED;
    let body = Readiness {
        status: database.status,
        version: env!("CARGO_PKG_VERSION"),
        storage: state.settings.storage.backend,
        uptime_seconds: started.elapsed().as_secs(),
        started_at: started_at.to_rfc3339(),
        database,
    };

    (body.status.http_status(), Json(body))
}

async fn ping(pool: &PgPool) -> Check {
    let start = Instant::now();
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => Check::timed(start.elapsed()),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            Check::failed(format!("Database connection failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_slow_database_is_degraded_but_ready() {
        let check = Check::timed(Duration::from_millis(250));
        assert_eq!(check.status, HealthStatus::Degraded);
        assert_eq!(check.status.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_failed_check_is_unavailable() {
        let check = Check::failed("refused".into());
        assert_eq!(check.status.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_check_serialization_omits_absent_fields() {
        assert_eq!(
            serde_json::to_value(Check::timed(Duration::from_millis(3))).unwrap(),
            json!({"status": "healthy", "latency_ms": 3})
        );
    }
}
