//! AI Situation Reports
//!
//! Turns the loaded record set into a short narrative report using an
//! external text-generation service.
//!
//! The report is advisory. `SituationReporter::generate` never fails: a
//! missing API key or a failed call degrades to a fixed, displayable message.

mod gemini;
mod prompt;

pub use gemini::{GeminiClient, GeminiConfig};
pub use prompt::{build_prompt, needs_summary, shelter_summary, DEFAULT_MAX_MEDICAL_NEEDS};

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::model::Refugee;

/// Shown when no API key is configured
pub const KEY_NOT_FOUND_MESSAGE: &str = "ไม่พบ API Key ไม่สามารถสร้างรายงานได้";
/// Shown when the text-generation service fails
pub const SERVICE_ERROR_MESSAGE: &str = "ไม่สามารถสร้างรายงานได้เนื่องจากข้อผิดพลาดของบริการ AI";

/// A text-generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single prompt
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, GenerateError>;
}

/// Errors from the text-generation service
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("AI service unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("AI service returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerateError::Timeout
        } else if e.is_connect() {
            GenerateError::Unavailable
        } else {
            GenerateError::Request(e)
        }
    }
}

/// Where the API key comes from. Resolved on every call, so a key added to
/// the environment after startup is picked up.
#[derive(Clone, Default)]
pub struct ApiKeySource {
    env_var: Option<String>,
    fallback: Option<String>,
}

impl ApiKeySource {
    /// Read the key from an environment variable
    pub fn env(var: impl Into<String>) -> Self {
        Self {
            env_var: Some(var.into()),
            fallback: None,
        }
    }

    /// A fixed key (or none)
    pub fn fixed(key: Option<String>) -> Self {
        Self {
            env_var: None,
            fallback: key,
        }
    }

    /// Builder method: key to use when the environment variable is unset
    pub fn with_fallback(mut self, key: Option<String>) -> Self {
        self.fallback = key;
        self
    }

    /// Current key, if any. Blank values count as missing.
    pub fn resolve(&self) -> Option<String> {
        self.env_var
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.fallback.clone().filter(|key| !key.trim().is_empty()))
    }
}

impl std::fmt::Debug for ApiKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeySource")
            .field("env_var", &self.env_var)
            .field("fallback", &self.fallback.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Builds prompts and calls the generator, degrading every failure to text
#[derive(Clone)]
pub struct SituationReporter {
    generator: Arc<dyn TextGenerator>,
    key_source: ApiKeySource,
    max_medical_needs: usize,
}

impl SituationReporter {
    pub fn new(generator: Arc<dyn TextGenerator>, key_source: ApiKeySource) -> Self {
        Self {
            generator,
            key_source,
            max_medical_needs: DEFAULT_MAX_MEDICAL_NEEDS,
        }
    }

    /// Builder method: cap on medical-needs entries quoted in the prompt
    pub fn max_medical_needs(mut self, max: usize) -> Self {
        self.max_medical_needs = max;
        self
    }

    /// Whether a key is currently available
    pub fn has_api_key(&self) -> bool {
        self.key_source.resolve().is_some()
    }

    /// Generate a report for the record set
    pub async fn generate(&self, records: &[Refugee]) -> String {
        let Some(api_key) = self.key_source.resolve() else {
            tracing::warn!("API key not found for the AI service");
            return KEY_NOT_FOUND_MESSAGE.to_string();
        };

        let prompt = build_prompt(records, self.max_medical_needs);
        tracing::debug!(
            records = records.len(),
            prompt_chars = prompt.len(),
            "Requesting situation report"
        );

        match self.generator.generate(&api_key, &prompt).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "AI service error");
                SERVICE_ERROR_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::record;
    use crate::model::MEDICAL_NONE;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedGenerator {
        calls: AtomicUsize,
        fail: bool,
        last_prompt: Mutex<Option<String>>,
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, _api_key: &str, prompt: &str) -> Result<String, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            if self.fail {
                Err(GenerateError::Unavailable)
            } else {
                Ok("## สรุป".to_string())
            }
        }
    }

    fn records() -> Vec<Refugee> {
        vec![
            record("a", "a", "A", "ชาย", MEDICAL_NONE),
            record("b", "b", "B", "หญิง", "Flu"),
        ]
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_call() {
        let generator = Arc::new(ScriptedGenerator::default());
        let reporter = SituationReporter::new(generator.clone(), ApiKeySource::fixed(None));

        assert!(!reporter.has_api_key());
        assert_eq!(reporter.generate(&records()).await, KEY_NOT_FOUND_MESSAGE);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_key_counts_as_missing() {
        let generator = Arc::new(ScriptedGenerator::default());
        let reporter =
            SituationReporter::new(generator.clone(), ApiKeySource::fixed(Some("  ".into())));

        assert_eq!(reporter.generate(&records()).await, KEY_NOT_FOUND_MESSAGE);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_service_failure_message() {
        let generator = Arc::new(ScriptedGenerator {
            fail: true,
            ..Default::default()
        });
        let reporter =
            SituationReporter::new(generator.clone(), ApiKeySource::fixed(Some("k".into())));

        assert_eq!(reporter.generate(&records()).await, SERVICE_ERROR_MESSAGE);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_report_passes_prompt() {
        let generator = Arc::new(ScriptedGenerator::default());
        let reporter =
            SituationReporter::new(generator.clone(), ApiKeySource::fixed(Some("k".into())));

        assert_eq!(reporter.generate(&records()).await, "## สรุป");
        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("จำนวนผู้อพยพทั้งหมด: 2"));
        assert!(prompt.contains("Flu"));
    }

    #[tokio::test]
    async fn test_env_key_is_read_at_generation_time() {
        const VAR: &str = "REFUGEE_CONNECT_TEST_RUNTIME_KEY_VAR";
        std::env::remove_var(VAR);

        let generator = Arc::new(ScriptedGenerator::default());
        let reporter = SituationReporter::new(generator.clone(), ApiKeySource::env(VAR));

        assert_eq!(reporter.generate(&records()).await, KEY_NOT_FOUND_MESSAGE);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

        std::env::set_var(VAR, "abc");
        assert!(reporter.has_api_key());
        assert_eq!(reporter.generate(&records()).await, "## สรุป");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

        std::env::remove_var(VAR);
    }

    #[test]
    fn test_key_source_env_fallback() {
        let source = ApiKeySource::env("REFUGEE_CONNECT_TEST_UNSET_KEY_VAR")
            .with_fallback(Some("from-file".into()));
        assert_eq!(source.resolve().as_deref(), Some("from-file"));
        assert!(!format!("{:?}", source).contains("from-file"));
    }
}
