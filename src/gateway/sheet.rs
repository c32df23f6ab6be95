//! Sheet Endpoint Client
//!
//! HTTP client for the spreadsheet web app (a Google Apps Script deployment)
//! that stores registrations.
//!
//! - Reads: `GET <url>?t=<unix-millis>`; the timestamp defeats intermediate
//!   caches.
//! - Writes: `POST <url>` with a JSON body sent as `text/plain`, the content
//!   type Apps Script accepts without a CORS preflight.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use super::{GatewayError, RecordGateway, SubmitResult};
use crate::model::{NewRefugee, Refugee};

/// How much of the write response the gateway trusts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Read the response; non-2xx or an error body fails the write.
    #[default]
    Acknowledged,
    /// Ignore the response. Success only means the request was sent; a record
    /// the endpoint drops is still reported as saved.
    FireAndForget,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown write mode: {0} (expected acknowledged or fire-and-forget)")]
pub struct ParseWriteModeError(pub String);

impl FromStr for WriteMode {
    type Err = ParseWriteModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "acknowledged" | "ack" => Ok(WriteMode::Acknowledged),
            "fire-and-forget" | "fire_and_forget" | "no-cors" => Ok(WriteMode::FireAndForget),
            other => Err(ParseWriteModeError(other.to_string())),
        }
    }
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Acknowledged => write!(f, "acknowledged"),
            WriteMode::FireAndForget => write!(f, "fire-and-forget"),
        }
    }
}

/// Configuration for the sheet client
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Web app URL (e.g. "https://script.google.com/macros/s/<id>/exec")
    pub url: String,
    pub write_mode: WriteMode,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            write_mode: WriteMode::default(),
            request_timeout_ms: 15_000,
        }
    }
}

impl SheetConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Builder method: set the write mode
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }
}

/// `RecordGateway` backed by the sheet web app
pub struct SheetGateway {
    client: Client,
    config: SheetConfig,
}

impl SheetGateway {
    /// Create a new sheet client with the given configuration
    pub fn new(config: SheetConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(GatewayError::Request)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    fn endpoint(&self) -> Result<&str, GatewayError> {
        let url = self.config.url.trim();
        if url.is_empty() {
            Err(GatewayError::NotConfigured)
        } else {
            Ok(url)
        }
    }

    async fn try_fetch_all(&self) -> Result<Vec<Refugee>, GatewayError> {
        let url = self.endpoint()?;

        let response = self
            .client
            .get(url)
            .query(&[("t", Utc::now().timestamp_millis())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        decode_records(payload)
    }

    async fn try_submit(&self, record: &NewRefugee) -> Result<(), GatewayError> {
        let url = self.endpoint()?;
        let body = serde_json::to_string(record)?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await?;

        match self.config.write_mode {
            WriteMode::FireAndForget => Ok(()),
            WriteMode::Acknowledged => check_acknowledgement(response).await,
        }
    }
}

#[async_trait]
impl RecordGateway for SheetGateway {
    async fn fetch_all(&self) -> Vec<Refugee> {
        match self.try_fetch_all().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Fetched records from sheet endpoint");
                records
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to fetch records from sheet endpoint, showing empty set"
                );
                Vec::new()
            }
        }
    }

    async fn submit_one(&self, record: &NewRefugee) -> SubmitResult {
        match self.try_submit(record).await {
            Ok(()) => {
                tracing::info!(
                    shelter = %record.shelter_name,
                    write_mode = %self.config.write_mode,
                    "Submitted registration"
                );
                SubmitResult::ok()
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    shelter = %record.shelter_name,
                    "Error submitting registration"
                );
                SubmitResult::failed(e.to_string())
            }
        }
    }
}

/// Decode a read payload: either a top-level array of records or an object
/// carrying the array under `data`. Elements that do not decode are skipped.
pub fn decode_records(payload: serde_json::Value) -> Result<Vec<Refugee>, GatewayError> {
    let items = match payload {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut envelope) => match envelope.remove("data") {
            Some(serde_json::Value::Array(items)) => items,
            Some(serde_json::Value::Null) | None => Vec::new(),
            Some(_) => return Err(GatewayError::Malformed("`data` is not a list".to_string())),
        },
        _ => return Err(GatewayError::Malformed("expected a list of records".to_string())),
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Refugee>(item) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(index, error = %e, "Skipping undecodable record"),
        }
    }

    Ok(records)
}

/// Apps Script reports handler failures with a 200 and `{"result": "error"}`.
async fn check_acknowledgement(response: Response) -> Result<(), GatewayError> {
    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::Status(status.as_u16()));
    }

    let text = response.text().await.unwrap_or_default();
    let Ok(body) = serde_json::from_str::<serde_json::Value>(&text) else {
        return Ok(());
    };

    let failed = body
        .get("result")
        .or_else(|| body.get("status"))
        .and_then(|v| v.as_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("error"));

    if failed {
        let message = body
            .get("error")
            .or_else(|| body.get("message"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error");
        return Err(GatewayError::Rejected(message.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::spawn_endpoint;
    use crate::model::RefugeeDraft;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn sample_record() -> NewRefugee {
        RefugeeDraft::default()
            .name("Somchai", "Jaidee")
            .shelter("Mae La")
            .stamp(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())
    }

    fn gateway(url: &str, mode: WriteMode) -> SheetGateway {
        SheetGateway::new(SheetConfig::new(url).write_mode(mode)).unwrap()
    }

    #[test]
    fn test_decode_records_array() {
        let payload = serde_json::json!([{"firstName": "A"}, {"firstName": "B"}]);
        let records = decode_records(payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].first_name, "B");
    }

    #[test]
    fn test_decode_records_envelope() {
        let payload = serde_json::json!({"data": [{"firstName": "A"}]});
        assert_eq!(decode_records(payload).unwrap().len(), 1);

        let no_data = serde_json::json!({"result": "ok"});
        assert!(decode_records(no_data).unwrap().is_empty());
    }

    #[test]
    fn test_decode_records_skips_bad_rows() {
        let payload = serde_json::json!(["header row", {"firstName": "A"}, 42, null]);
        let records = decode_records(payload).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_decode_records_rejects_scalars() {
        assert!(decode_records(serde_json::json!("nope")).is_err());
        assert!(decode_records(serde_json::json!({"data": "nope"})).is_err());
    }

    #[test]
    fn test_write_mode_parse() {
        assert_eq!("fire-and-forget".parse::<WriteMode>().unwrap(), WriteMode::FireAndForget);
        assert_eq!("Acknowledged".parse::<WriteMode>().unwrap(), WriteMode::Acknowledged);
        assert!("sometimes".parse::<WriteMode>().is_err());
        assert_eq!(WriteMode::default(), WriteMode::Acknowledged);
    }

    #[tokio::test]
    async fn test_fetch_all_sends_cache_buster() {
        let router = Router::new().route(
            "/exec",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let busted = params.get("t").is_some_and(|t| t.parse::<i64>().is_ok());
                if busted {
                    Json(serde_json::json!([{"id": "1", "firstName": "A", "shelterName": "S"}]))
                } else {
                    Json(serde_json::json!([]))
                }
            }),
        );
        let url = spawn_endpoint(router).await;

        let records = gateway(&url, WriteMode::Acknowledged).fetch_all().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_fetch_all_envelope_response() {
        let router = Router::new().route(
            "/exec",
            get(|| async {
                Json(serde_json::json!({"data": [{"firstName": "A"}, {"firstName": "B"}]}))
            }),
        );
        let url = spawn_endpoint(router).await;

        let records = gateway(&url, WriteMode::Acknowledged).fetch_all().await;
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_all_non_ok_status_is_empty() {
        let router = Router::new().route(
            "/exec",
            get(|| async {
                let body = Json(serde_json::json!([{"firstName": "A"}]));
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }),
        );
        let url = spawn_endpoint(router).await;

        let records = gateway(&url, WriteMode::Acknowledged).fetch_all().await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_malformed_body_is_empty() {
        let router = Router::new().route("/exec", get(|| async { "<html>login</html>" }));
        let url = spawn_endpoint(router).await;

        assert!(gateway(&url, WriteMode::Acknowledged).fetch_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_unreachable_is_empty() {
        let records = gateway("http://127.0.0.1:1/exec", WriteMode::Acknowledged)
            .fetch_all()
            .await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint() {
        let gw = gateway("", WriteMode::Acknowledged);
        assert!(gw.fetch_all().await.is_empty());

        let result = gw.submit_one(&sample_record()).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("sheet endpoint not configured"));
    }

    #[tokio::test]
    async fn test_submit_posts_text_plain_json() {
        let captured: Arc<Mutex<Vec<(Option<String>, String)>>> = Arc::default();
        let sink = Arc::clone(&captured);
        let router = Router::new().route(
            "/exec",
            post(move |headers: HeaderMap, body: String| {
                let sink = Arc::clone(&sink);
                async move {
                    let content_type = headers
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    sink.lock().unwrap().push((content_type, body));
                    Json(serde_json::json!({"result": "success"}))
                }
            }),
        );
        let url = spawn_endpoint(router).await;

        let result = gateway(&url, WriteMode::Acknowledged)
            .submit_one(&sample_record())
            .await;
        assert_eq!(result, SubmitResult::ok());

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let (content_type, body) = &captured[0];
        assert_eq!(content_type.as_deref(), Some("text/plain"));

        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["firstName"], "Somchai");
        assert_eq!(json["registrationDate"], "2025-01-05");
        assert_eq!(json["status"], crate::model::STATUS_PENDING);
    }

    #[tokio::test]
    async fn test_submit_acknowledged_reports_http_failure() {
        let router =
            Router::new().route("/exec", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let url = spawn_endpoint(router).await;

        let result = gateway(&url, WriteMode::Acknowledged)
            .submit_one(&sample_record())
            .await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("HTTP 500"));
    }

    #[tokio::test]
    async fn test_submit_acknowledged_reports_script_error() {
        let router = Router::new().route(
            "/exec",
            post(|| async {
                Json(serde_json::json!({"result": "error", "error": "sheet locked"}))
            }),
        );
        let url = spawn_endpoint(router).await;

        let result = gateway(&url, WriteMode::Acknowledged)
            .submit_one(&sample_record())
            .await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("sheet locked"));
    }

    #[tokio::test]
    async fn test_submit_fire_and_forget_ignores_response() {
        let router =
            Router::new().route("/exec", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let url = spawn_endpoint(router).await;

        let result = gateway(&url, WriteMode::FireAndForget)
            .submit_one(&sample_record())
            .await;
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_submit_fire_and_forget_transport_failure() {
        let result = gateway("http://127.0.0.1:1/exec", WriteMode::FireAndForget)
            .submit_one(&sample_record())
            .await;
        assert!(!result.success);
        assert!(result.error.is_some());
    }
}
