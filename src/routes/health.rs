//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK when the process is running.
//! Used by the Docker `HEALTHCHECK`, compose healthchecks, and load balancers.

use axum::Json;
use serde::Serialize;

use crate::config::HEALTH_STATUS_HEALTHY;

/// Body of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

impl HealthStatus {
    pub const fn healthy() -> Self {
        Self {
            status: HEALTH_STATUS_HEALTHY,
        }
    }
}

/// Health check handler.
///
/// This is a liveness probe - it only checks that the process can respond to HTTP.
pub async fn health() -> Json<HealthStatus> {
    tracing::debug!("Health check requested");
    Json(HealthStatus::healthy())
}
