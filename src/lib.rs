//! # RefugeeConnect
//!
//! Shelter registration and situation overview for displaced people. Records
//! live in a spreadsheet behind a web endpoint; this crate reads and writes
//! them, aggregates dashboard statistics, filters the registry and asks an
//! AI service for a short situation report.
//!
//! ## Modules
//!
//! - [`model`]: Record types, draft validation and routes
//! - [`gateway`]: Spreadsheet endpoint access (fail-soft reads, acknowledged writes)
//! - [`stats`]: Dashboard aggregation
//! - [`report`]: AI situation reports
//! - [`views`]: Screen view models (dashboard, list, registration form, navbar)
//! - [`shell`]: Application shell: current route, loaded records, reloads
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use refugee_connect::gateway::{SheetConfig, SheetGateway};
//! use refugee_connect::shell::AppShell;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SheetConfig::new("https://script.google.com/macros/s/ID/exec");
//!     let gateway = SheetGateway::new(config)?;
//!     let mut shell = AppShell::new(Arc::new(gateway));
//!
//!     let loaded = shell.reload().await;
//!     let dashboard = shell.dashboard();
//!
//!     println!("{} records, {}% with medical needs", loaded, dashboard.critical_rate_display);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod report;
pub mod shell;
pub mod stats;
pub mod views;

// Re-export top-level types for convenience
pub use model::{AppRoute, DraftError, NewRefugee, Refugee, RefugeeDraft};

pub use gateway::{GatewayError, RecordGateway, SheetConfig, SheetGateway, SubmitResult, WriteMode};

pub use stats::{DashboardStats, NameValue};

pub use report::{
    ApiKeySource, GeminiClient, GeminiConfig, GenerateError, SituationReporter, TextGenerator,
};

pub use views::{
    DashboardView, FormError, ListFilter, ListView, Navbar, RegistrationForm, SubmissionOutcome,
};

pub use shell::AppShell;

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{AiConfig, ApiConfig, Config, ConfigError, LoggingConfig, SheetSettings};
