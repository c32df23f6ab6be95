//! Remote Data Gateway
//!
//! Reads and writes registrations through the spreadsheet-backed web
//! endpoint.
//!
//! ## Failure policy
//!
//! - `fetch_all` is fail-soft: any failure yields an empty record set and a
//!   warning in the log. Dashboard and list render empty rather than error.
//! - `submit_one` reports failure as a value (`SubmitResult`), never as an
//!   error. Callers decide how to present partial failures.

mod error;
mod sheet;

#[cfg(test)]
pub(crate) mod testing;

pub use error::GatewayError;
pub use sheet::{decode_records, ParseWriteModeError, SheetConfig, SheetGateway, WriteMode};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{NewRefugee, Refugee};

/// Common trait for record backends
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Load every registered record. Never fails; failures yield an empty vec.
    async fn fetch_all(&self) -> Vec<Refugee>;

    /// Persist one new record.
    async fn submit_one(&self, record: &NewRefugee) -> SubmitResult;
}

/// Outcome of a single write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
