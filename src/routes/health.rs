//! Health check endpoints
//!
//! - /health - basic health check
//! - /health/ready - readiness probe (pings the database)
//! - /health/live - liveness probe (always OK while the server runs)

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Value>,
}

fn respond(status: &'static str, checks: Option<Value>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks,
    })
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    respond("healthy", None)
}

/// Readiness probe, returns 503 if the database is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    match db::health_check(state.db()).await {
        Ok(()) => Ok(respond(
            "ready",
            Some(json!({ "database": { "status": "healthy" } })),
        )),
        Err(e) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            respond(
                "not_ready",
                Some(json!({ "database": { "status": "unhealthy", "message": e.to_string() } })),
            ),
        )),
    }
}

/// Liveness probe
pub async fn liveness_check() -> Json<HealthResponse> {
    respond("alive", None)
}
