use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use crate::handlers::AppState;

/// Component health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Up,
    Down,
}

/// Database health details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub status: ComponentStatus,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub database: DatabaseHealth,
    pub version: String,
    pub timestamp: String,
}

/// Liveness plus a database ping. Answers 503 while the database is
/// unreachable so a load balancer can pull the instance.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let ping = state.seeds.ping().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let database = match ping {
        Ok(()) => DatabaseHealth {
            status: ComponentStatus::Up,
            latency_ms,
            error: None,
        },
        Err(err) => {
            warn!(error = %err, "Health check: database unreachable");
            DatabaseHealth {
                status: ComponentStatus::Down,
                latency_ms,
                error: Some(err.response_message()),
            }
        }
    };

    let status = database.status;
    let code = match status {
        ComponentStatus::Up => StatusCode::OK,
        ComponentStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
}

/// GET /health
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
