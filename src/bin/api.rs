//! RefugeeConnect API Server
//!
//! Run with: cargo run --bin refugee-connect-api
//!
//! # Configuration
//!
//! Read from `$CONFIG_DIR/refugee-connect/config.toml` or `./config.toml`,
//! then overridden by environment variables:
//! - `REFUGEE_CONNECT_CONFIG`: Explicit config file path
//! - `REFUGEE_CONNECT_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `REFUGEE_CONNECT_API_PORT`: Port to listen on (default: 8082)
//! - `REFUGEE_CONNECT_SHEET_URL`: Sheet web app URL
//! - `REFUGEE_CONNECT_WRITE_MODE`: `acknowledged` or `fire-and-forget`
//! - `API_KEY`: AI service key, read on every report
//! - `RUST_LOG`: Log filter (overrides the configured level)

use anyhow::Context;
use refugee_connect::api::{serve, AppState};
use refugee_connect::config::Config;
use refugee_connect::gateway::SheetGateway;
use refugee_connect::logging::init_logging;
use refugee_connect::report::{GeminiClient, SituationReporter};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("REFUGEE_CONNECT_CONFIG") {
        Ok(path) => Config::load_with_env(Path::new(&path))?,
        Err(_) => Config::load_default(),
    };

    init_logging(&config.logging);

    tracing::info!("Starting RefugeeConnect API server v{}", env!("CARGO_PKG_VERSION"));

    let sheet_configured = !config.sheet.url.trim().is_empty();
    if sheet_configured {
        tracing::info!(write_mode = %config.sheet.write_mode, "Sheet endpoint configured");
    } else {
        tracing::warn!("Sheet endpoint not configured; lists will be empty and writes will fail");
    }

    let gateway = SheetGateway::new(config.sheet.to_sheet_config())
        .context("failed to build sheet client")?;

    let generator = GeminiClient::new(config.ai.to_gemini_config())
        .context("failed to build AI client")?;
    let reporter = SituationReporter::new(Arc::new(generator), config.ai.key_source())
        .max_medical_needs(config.ai.max_medical_needs);

    if !reporter.has_api_key() {
        tracing::warn!(
            "No AI key in ${} or config; reports will show a fixed message",
            config.ai.api_key_env
        );
    }

    let state = AppState::new(Arc::new(gateway), reporter, sheet_configured);

    serve(state, &config.api).await?;

    tracing::info!("RefugeeConnect API server stopped");
    Ok(())
}
