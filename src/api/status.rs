//! Status Routes
//!
//! Routes:
//! - GET /health - Basic health check

use std::sync::OnceLock;
use std::time::Instant;

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

static STARTUP_TIME: OnceLock<Instant> = OnceLock::new();

/// Initialize startup time. Call this once at server start.
pub fn init_startup_time() {
    let _ = STARTUP_TIME.get_or_init(Instant::now);
}

fn get_uptime_seconds() -> u64 {
    STARTUP_TIME.get().map(|start| start.elapsed().as_secs()).unwrap_or(0)
}

/// Build status routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

/// Basic health check.
///
/// GET /health
///
/// Returns 200 if the server is running.
#[axum::debug_handler]
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: get_uptime_seconds(),
        timestamp: Utc::now(),
    })
}
