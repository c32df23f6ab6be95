//! Dashboard Routes
//!
//! - GET /api/v1/dashboard - Aggregated statistics

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::views::DashboardView;

/// GET /api/v1/dashboard
///
/// Statistics over every record the sheet currently returns. An unreachable
/// sheet yields all-zero statistics.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let records = state.gateway.fetch_all().await;
    Json(DashboardView::build(&records))
}
