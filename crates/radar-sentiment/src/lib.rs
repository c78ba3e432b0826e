//! Sentiment classification of answers towards a brand.
//!
//! Builds the classification prompt, calls an OpenRouter-compatible
//! chat-completion endpoint, and turns the reply into a validated verdict.
//! Also suggests competitors for brands the registry does not know.

pub mod classifier;
pub mod client;
pub mod competitors;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod response;
pub mod stats;
pub mod types;

pub use classifier::SentimentClassifier;
pub use client::ChatClient;
pub use competitors::{infer_country, parse_competitor_lines, CompetitorCache, CompetitorSuggester};
pub use error::SentimentError;
pub use pipeline::evaluate_records;
pub use response::{parse_response, strip_code_fence, ParsedResponse};
pub use stats::EvaluationStats;
pub use types::{ClassificationRequest, ClassificationResult, SentimentConfig};
