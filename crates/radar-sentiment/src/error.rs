use thiserror::Error;

/// Errors from the chat-completion service.
///
/// None of these abort a batch: the classifier folds them into a default
/// result and the competitor suggester into an empty set.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat completion returned status {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body did not have the chat-completion shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("chat completion contained no message content")]
    EmptyCompletion,

    #[error("OPENROUTER_API_KEY is not set")]
    MissingApiKey,
}
