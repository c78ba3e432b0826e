use std::time::Duration;

use radar_core::{AppConfig, Classification, Record, Trigger};

/// Settings for the chat-completion service and the evaluation loop.
#[derive(Clone)]
pub struct SentimentConfig {
    pub api_key: Option<String>,
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Pause after every classification call.
    pub delay: Duration,
}

impl SentimentConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.openrouter_api_key.clone(),
            url: config.llm_url.clone(),
            model: config.llm_model.clone(),
            timeout_secs: config.llm_request_timeout_secs,
            delay: Duration::from_millis(config.llm_inter_request_delay_ms),
        }
    }
}

impl std::fmt::Debug for SentimentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("url", &self.url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("delay", &self.delay)
            .finish()
    }
}

/// What the classifier is asked about one answer.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRequest<'a> {
    pub brand: &'a str,
    pub question: &'a str,
    pub answer: &'a str,
    /// Whether the brand appears in the answer at all.
    pub mentioned: bool,
}

/// Final, validated verdict for one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub classification: Classification,
    pub reason: String,
    /// Always empty for [`Classification::Opportunity`].
    pub triggers: Vec<Trigger>,
    pub psychological_impact: String,
}

impl ClassificationResult {
    /// Reason recorded when the service could not be reached.
    pub const API_ERROR_REASON: &'static str = "API error";

    /// Build a result, dropping triggers if the verdict is an opportunity.
    #[must_use]
    pub fn new(
        classification: Classification,
        reason: String,
        triggers: Vec<Trigger>,
        psychological_impact: String,
    ) -> Self {
        let triggers = if classification == Classification::Opportunity {
            Vec::new()
        } else {
            triggers
        };
        Self {
            classification,
            reason,
            triggers,
            psychological_impact,
        }
    }

    /// Default verdict used when the service call fails.
    #[must_use]
    pub fn api_error() -> Self {
        Self::new(
            Classification::Warning,
            Self::API_ERROR_REASON.to_string(),
            Vec::new(),
            String::new(),
        )
    }

    /// Copy the verdict onto a record.
    pub fn apply_to(self, record: &mut Record) {
        record.classification = Some(self.classification);
        record.classification_reason = Some(self.reason);
        record.triggers_detected = Some(self.triggers);
        record.psychological_impact = Some(self.psychological_impact);
    }
}
