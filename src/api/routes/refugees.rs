//! Refugee Routes
//!
//! - GET /api/v1/refugees - Filtered record list
//! - POST /api/v1/refugees - Register one person
//! - POST /api/v1/refugees/batch - Register up to five people
//! - GET /api/v1/shelters - Shelter names for the filter control

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{BatchRegisterRequest, BatchRegisterResponse, ListQuery, RefugeeListResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::gateway::SubmitResult;
use crate::model::RefugeeDraft;
use crate::views::{shelter_options, submit_batch, FormError, SubmissionOutcome, MAX_ENTRIES};

/// GET /api/v1/refugees
///
/// Upstream failures yield an empty list, not an error.
pub async fn list_refugees(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<RefugeeListResponse> {
    let records = state.gateway.fetch_all().await;
    let filter = query.into_filter();

    let shelters = shelter_options(&records);
    let matched: Vec<_> = filter.apply(&records).into_iter().cloned().collect();

    Json(RefugeeListResponse {
        total: records.len(),
        matched: matched.len(),
        records: matched,
        shelters,
    })
}

/// POST /api/v1/refugees
///
/// Validate, stamp with today's date and submit a single draft.
pub async fn create_refugee(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RefugeeDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubmitResult>)> {
    let Json(draft) = payload?;
    draft.validate()?;

    let record = draft.stamp(Utc::now().date_naive());
    let result = state.gateway.submit_one(&record).await;

    let status = if result.success {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_GATEWAY
    };

    Ok((status, Json(result)))
}

/// POST /api/v1/refugees/batch
///
/// Submit entries one after another. Saved entries stay saved when a later
/// one fails.
pub async fn register_batch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchRegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BatchRegisterResponse>)> {
    let Json(req) = payload?;
    if req.entries.is_empty() || req.entries.len() > MAX_ENTRIES {
        return Err(FormError::EntryCount(req.entries.len()).into());
    }

    let outcome = submit_batch(state.gateway.as_ref(), &req.entries, Utc::now().date_naive()).await;

    let status = if outcome.is_complete() {
        StatusCode::CREATED
    } else if outcome.saved() > 0 {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::BAD_GATEWAY
    };

    Ok((status, Json(batch_response(&outcome, req.entries.len()))))
}

fn batch_response(outcome: &SubmissionOutcome, total: usize) -> BatchRegisterResponse {
    let (status, last_error) = match outcome {
        SubmissionOutcome::Complete { .. } => ("ok", None),
        SubmissionOutcome::Partial { last_error, .. } => ("partial", Some(last_error.clone())),
    };

    BatchRegisterResponse {
        status: status.to_string(),
        saved: outcome.saved(),
        total,
        message: outcome.message(),
        last_error,
    }
}

/// GET /api/v1/shelters
pub async fn list_shelters(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let records = state.gateway.fetch_all().await;
    Json(shelter_options(&records))
}

