//! RefugeeConnect REST API
//!
//! HTTP layer in front of the sheet endpoint and the AI service, built with
//! Axum. Browsers talk to this server instead of posting to the sheet
//! directly, so write failures are reported back.
//!
//! # Endpoints
//!
//! ## Refugees
//! - `GET /api/v1/refugees?search=&shelter=` - Filtered list
//! - `POST /api/v1/refugees` - Register one person
//! - `POST /api/v1/refugees/batch` - Register up to five people
//! - `GET /api/v1/shelters` - Shelter names
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Aggregated statistics
//! - `POST /api/v1/report` - AI situation report
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health` - Configuration status
//!
//! # Example
//!
//! ```rust,ignore
//! use refugee_connect::api::{serve, AppState};
//! use refugee_connect::config::Config;
//! use refugee_connect::gateway::SheetGateway;
//! use refugee_connect::report::{GeminiClient, SituationReporter};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let gateway = Arc::new(SheetGateway::new(config.sheet.to_sheet_config())?);
//!     let client = Arc::new(GeminiClient::new(config.ai.to_gemini_config())?);
//!     let reporter = SituationReporter::new(client, config.ai.key_source());
//!
//!     let state = AppState::new(gateway, reporter, !config.sheet.url.is_empty());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/refugees",
            get(routes::refugees::list_refugees).post(routes::refugees::create_refugee),
        )
        .route("/refugees/batch", post(routes::refugees::register_batch))
        .route("/shelters", get(routes::refugees::list_shelters))
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/report", post(routes::report::generate_report));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("RefugeeConnect API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("RefugeeConnect API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
