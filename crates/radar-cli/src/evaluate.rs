//! `evaluate` command: sentiment verdicts for enriched records.

use std::time::Duration;

use anyhow::Context;
use radar_core::{AppConfig, Record};
use radar_sentiment::{evaluate_records, ChatClient, SentimentClassifier, SentimentConfig};

/// Apply command-line overrides on top of the environment configuration.
pub(crate) fn apply_overrides(config: &mut AppConfig, model: Option<String>, delay_ms: Option<u64>) {
    if let Some(model) = model {
        config.llm_model = model;
    }
    if let Some(delay_ms) = delay_ms {
        config.llm_inter_request_delay_ms = delay_ms;
    }
}

/// A ready-to-run classification stage.
///
/// Built before any other work so a missing API key fails the command at
/// startup.
pub(crate) struct Evaluator {
    classifier: SentimentClassifier,
    delay: Duration,
}

impl Evaluator {
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client cannot
    /// be built.
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let sentiment = SentimentConfig::from_app_config(config);
        let client =
            ChatClient::new(&sentiment).context("classification needs OPENROUTER_API_KEY")?;
        Ok(Self {
            classifier: SentimentClassifier::new(client),
            delay: sentiment.delay,
        })
    }

    /// Classify every record towards `brand`, writing verdicts in place.
    ///
    /// Failed calls are recorded as API errors and do not stop the batch.
    pub(crate) async fn run(&self, brand: &str, records: &mut [Record]) {
        tracing::info!(
            brand,
            model = %self.classifier.model(),
            records = records.len(),
            delay = ?self.delay,
            "starting sentiment evaluation"
        );
        let stats = evaluate_records(&self.classifier, brand, records, self.delay).await;
        stats.log_summary();
    }
}
