//! Sentiment classification of one answer towards the main brand.

use crate::client::ChatClient;
use crate::error::SentimentError;
use crate::prompt::build_classification_prompt;
use crate::response::parse_response;
use crate::types::{ClassificationRequest, ClassificationResult};

const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.0;

/// Classifies answers through the chat-completion service.
pub struct SentimentClassifier {
    client: ChatClient,
}

impl SentimentClassifier {
    #[must_use]
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Request, parse and validate one classification.
    ///
    /// Malformed completion text is not an error: it degrades to the keyword
    /// fallback.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the service call itself fails.
    pub async fn try_classify(
        &self,
        request: &ClassificationRequest<'_>,
    ) -> Result<ClassificationResult, SentimentError> {
        let prompt = build_classification_prompt(request);
        let content = self.client.complete(&prompt, TEMPERATURE, MAX_TOKENS).await?;
        Ok(parse_response(&content).into_result())
    }

    /// Like [`Self::try_classify`], but a failed call yields
    /// [`ClassificationResult::api_error`]. Never retries.
    pub async fn classify(&self, request: &ClassificationRequest<'_>) -> ClassificationResult {
        match self.try_classify(request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    brand = %request.brand,
                    model = %self.client.model(),
                    error = %e,
                    "classification request failed, defaulting to WARNING"
                );
                ClassificationResult::api_error()
            }
        }
    }
}
