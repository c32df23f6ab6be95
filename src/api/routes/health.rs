//! Health Routes
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health - Configuration status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Degraded when the sheet endpoint or the AI key is missing. Does not call
/// either service.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sheet_configured = state.sheet_configured;
    let ai_key_configured = state.reporter.has_api_key();

    let status = if sheet_configured && ai_key_configured {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        sheet_configured,
        ai_key_configured,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
