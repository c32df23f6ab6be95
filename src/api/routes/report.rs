//! Report Routes
//!
//! - POST /api/v1/report - Generate an AI situation report

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::ReportResponse;
use crate::api::state::AppState;

/// POST /api/v1/report
///
/// Always 200. A missing key or an AI service failure comes back as a fixed
/// message in `report`.
pub async fn generate_report(State(state): State<Arc<AppState>>) -> Json<ReportResponse> {
    let records = state.gateway.fetch_all().await;
    let report = state.reporter.generate(&records).await;
    Json(ReportResponse { report })
}
