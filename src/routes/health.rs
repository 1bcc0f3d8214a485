//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is running.

use axum::Json;
use serde::Serialize;

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check handler.
///
/// This is a liveness probe - it only checks that the process can respond to HTTP.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
