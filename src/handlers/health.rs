//! Health check handler

use axum::Json;
use serde::Serialize;

use crate::lifecycle::ServiceState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: ServiceState,
    version: &'static str,
    timestamp: i64,
}

/// Only reachable once artifacts are loaded, so the state is always ready
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: ServiceState::Ready,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
