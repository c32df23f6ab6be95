//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::model::{Refugee, RefugeeDraft};
use crate::views::{ListFilter, ALL_SHELTERS};

// ============================================
// LIST DTOs
// ============================================

/// Query string for the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive search over names and shelter
    #[serde(default)]
    pub search: Option<String>,
    /// Shelter name, or "all"
    #[serde(default)]
    pub shelter: Option<String>,
}

impl ListQuery {
    pub fn into_filter(self) -> ListFilter {
        ListFilter {
            search: self.search.unwrap_or_default(),
            shelter: self.shelter.unwrap_or_else(|| ALL_SHELTERS.to_string()),
        }
    }
}

/// Filtered records plus the shelter options for the filter control
#[derive(Debug, Serialize)]
pub struct RefugeeListResponse {
    pub records: Vec<Refugee>,
    pub shelters: Vec<String>,
    /// Records loaded before filtering
    pub total: usize,
    /// Records that passed the filter
    pub matched: usize,
}

// ============================================
// REGISTRATION DTOs
// ============================================

/// Batch registration request
#[derive(Debug, Deserialize)]
pub struct BatchRegisterRequest {
    /// One to five form entries
    pub entries: Vec<RefugeeDraft>,
}

/// Batch registration response
#[derive(Debug, Serialize)]
pub struct BatchRegisterResponse {
    /// Status: "ok" or "partial"
    pub status: String,
    /// Entries saved
    pub saved: usize,
    /// Entries submitted
    pub total: usize,
    /// User-facing outcome message
    pub message: String,
    /// Error of the last failed entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

// ============================================
// REPORT DTOs
// ============================================

/// Situation report response
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Markdown report, or a fixed message when generation was not possible
    pub report: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Whether a sheet endpoint URL is configured
    pub sheet_configured: bool,
    /// Whether an AI key is currently available
    pub ai_key_configured: bool,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
