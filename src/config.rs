//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::gateway::{SheetConfig, WriteMode};
use crate::report::{ApiKeySource, GeminiConfig, DEFAULT_MAX_MEDICAL_NEEDS};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub sheet: SheetSettings,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Sheet endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SheetSettings {
    /// Web app URL; empty means not configured
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub write_mode: WriteMode,

    #[serde(default = "default_sheet_timeout")]
    pub request_timeout_ms: u64,
}

fn default_sheet_timeout() -> u64 {
    15_000
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            write_mode: WriteMode::default(),
            request_timeout_ms: default_sheet_timeout(),
        }
    }
}

impl SheetSettings {
    pub fn to_sheet_config(&self) -> SheetConfig {
        SheetConfig {
            url: self.url.clone(),
            write_mode: self.write_mode,
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// AI report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,

    #[serde(default = "default_ai_model")]
    pub model: String,

    /// Environment variable holding the API key, read on every report
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Key to use when the environment variable is unset
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_max_medical_needs")]
    pub max_medical_needs: usize,

    #[serde(default = "default_ai_timeout")]
    pub request_timeout_ms: u64,
}

fn default_ai_base_url() -> String {
    GeminiConfig::default().base_url
}

fn default_ai_model() -> String {
    GeminiConfig::default().model
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_max_medical_needs() -> usize {
    DEFAULT_MAX_MEDICAL_NEEDS
}

fn default_ai_timeout() -> u64 {
    30_000
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: default_ai_base_url(),
            model: default_ai_model(),
            api_key_env: default_api_key_env(),
            api_key: None,
            max_medical_needs: default_max_medical_needs(),
            request_timeout_ms: default_ai_timeout(),
        }
    }
}

impl AiConfig {
    pub fn to_gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }

    pub fn key_source(&self) -> ApiKeySource {
        ApiKeySource::env(self.api_key_env.clone()).with_fallback(self.api_key.clone())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("refugee-connect").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(host) = std::env::var("REFUGEE_CONNECT_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("REFUGEE_CONNECT_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Sheet overrides
        if let Ok(url) = std::env::var("REFUGEE_CONNECT_SHEET_URL") {
            self.sheet.url = url;
        }
        if let Ok(mode) = std::env::var("REFUGEE_CONNECT_WRITE_MODE") {
            match mode.parse() {
                Ok(m) => self.sheet.write_mode = m,
                Err(e) => tracing::warn!("Ignoring REFUGEE_CONNECT_WRITE_MODE: {}", e),
            }
        }

        // AI overrides
        if let Ok(model) = std::env::var("REFUGEE_CONNECT_AI_MODEL") {
            self.ai.model = model;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("REFUGEE_CONNECT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("REFUGEE_CONNECT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# RefugeeConnect Configuration
#
# Environment variables override these settings:
# - REFUGEE_CONNECT_API_HOST
# - REFUGEE_CONNECT_API_PORT
# - REFUGEE_CONNECT_SHEET_URL
# - REFUGEE_CONNECT_WRITE_MODE
# - REFUGEE_CONNECT_AI_MODEL
# - REFUGEE_CONNECT_LOG_LEVEL
# - REFUGEE_CONNECT_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

[sheet]
# Google Apps Script web app URL (".../exec")
url = ""

# acknowledged: read the response and fail on HTTP or script errors
# fire-and-forget: report success as soon as the request is sent
write_mode = "acknowledged"

# Request timeout in milliseconds
request_timeout_ms = 15000

[ai]
# Gemini API base URL and model
base_url = "https://generativelanguage.googleapis.com"
model = "gemini-2.5-flash"

# Environment variable read for the API key on every report
api_key_env = "API_KEY"

# Fallback key when the environment variable is unset
# api_key = ""

# Medical-needs entries quoted in the report prompt
max_medical_needs = 50

# Request timeout in milliseconds
request_timeout_ms = 30000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.addr(), "0.0.0.0:8082");
        assert!(config.sheet.url.is_empty());
        assert_eq!(config.sheet.write_mode, WriteMode::Acknowledged);
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert_eq!(config.ai.api_key_env, "API_KEY");
        assert_eq!(config.ai.max_medical_needs, DEFAULT_MAX_MEDICAL_NEEDS);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8082);
        assert_eq!(config.sheet.request_timeout_ms, 15_000);
        assert_eq!(config.ai.api_key, None);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[sheet]
url = "https://script.google.com/macros/s/abc/exec"
write_mode = "fire-and-forget"

[ai]
max_medical_needs = 10
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sheet.url, "https://script.google.com/macros/s/abc/exec");
        assert_eq!(config.sheet.write_mode, WriteMode::FireAndForget);
        assert_eq!(config.ai.max_medical_needs, 10);
        assert_eq!(config.api.port, 8082);

        let sheet = config.sheet.to_sheet_config();
        assert_eq!(sheet.write_mode, WriteMode::FireAndForget);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sheet\nurl = 1").unwrap();
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/refugee-connect.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
