//! Application State
//!
//! Shared state accessible by all API handlers. Holds no records: every
//! request reads the sheet afresh.

use std::sync::Arc;
use std::time::Instant;

use crate::gateway::RecordGateway;
use crate::report::SituationReporter;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Record backend (the sheet endpoint in production)
    pub gateway: Arc<dyn RecordGateway>,
    /// Situation report generator
    pub reporter: SituationReporter,
    /// Whether the gateway has an endpoint to talk to
    pub sheet_configured: bool,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn RecordGateway>,
        reporter: SituationReporter,
        sheet_configured: bool,
    ) -> Self {
        Self {
            gateway,
            reporter,
            sheet_configured,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
