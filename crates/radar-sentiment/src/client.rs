//! Minimal chat-completion client (OpenRouter-compatible).

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::types::SentimentConfig;

const APP_TITLE: &str = "Answer Radar";

/// Client for an OpenAI-style `chat/completions` endpoint.
///
/// Use [`ChatClient::new`] with the run configuration or
/// [`ChatClient::with_base_url`] to point at a mock server in tests.
pub struct ChatClient {
    client: Client,
    api_key: String,
    url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatClient {
    /// Creates a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::MissingApiKey`] if no API key is configured
    /// and [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(config: &SentimentConfig) -> Result<Self, SentimentError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(SentimentError::MissingApiKey)?;
        Self::with_base_url(api_key, &config.model, config.timeout_secs, &config.url)
    }

    /// Creates a client for an explicit endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        url: &str,
    ) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("answer-radar/0.1")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            url: url.to_owned(),
            model: model.to_owned(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one user message and returns the trimmed reply text.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Http`] on network failure or timeout.
    /// - [`SentimentError::UnexpectedStatus`] on a non-2xx response.
    /// - [`SentimentError::Deserialize`] if the body is not a chat completion.
    /// - [`SentimentError::EmptyCompletion`] if there is no message content.
    pub async fn complete(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, SentimentError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SentimentError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| SentimentError::Deserialize {
                context: format!("chat completion from {}", self.url),
                source: e,
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(SentimentError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> SentimentConfig {
        SentimentConfig {
            api_key: api_key.map(str::to_string),
            url: "http://localhost:9/v1/chat/completions".to_string(),
            model: "test/model".to_string(),
            timeout_secs: 5,
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn new_requires_api_key() {
        assert!(matches!(
            ChatClient::new(&config(None)),
            Err(SentimentError::MissingApiKey)
        ));
        assert!(matches!(
            ChatClient::new(&config(Some("  "))),
            Err(SentimentError::MissingApiKey)
        ));
    }

    #[test]
    fn new_uses_configured_model() {
        let client = ChatClient::new(&config(Some("sk-test"))).expect("client should build");
        assert_eq!(client.model(), "test/model");
    }

    #[test]
    fn request_serializes_single_user_message() {
        let request = ChatRequest {
            model: "m",
            messages: [ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: 800,
            temperature: 0.0,
        };
        let value = serde_json::to_value(&request).expect("serializable");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
        assert_eq!(value["max_tokens"], 800);
    }
}
