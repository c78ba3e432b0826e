//! Parsing and validation of classification responses.
//!
//! Models often wrap their JSON in a markdown fence. The fence is removed
//! first; then the body either decodes as a JSON object ([`ParsedResponse::Parsed`])
//! or the raw text is scanned for a classification keyword
//! ([`ParsedResponse::Fallback`]). Validation turns either form into a
//! [`ClassificationResult`] that always holds one of the three verdicts.

use radar_core::{Classification, Trigger};
use serde_json::Value;

use crate::types::ClassificationResult;

/// Structured or degraded reading of a raw completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    /// The body decoded as an object. `classification` is the raw,
    /// uppercased label and may still be invalid.
    Parsed {
        classification: String,
        reason: String,
        triggers: Vec<Trigger>,
        psychological_impact: String,
    },
    /// The body was not a JSON object; only a keyword scan was possible.
    Fallback { classification: Option<Classification> },
}

/// Return the content of the first fenced block, preferring a `json` fence.
///
/// Text without a fence is returned trimmed. An unterminated fence yields
/// everything after its opening marker.
#[must_use]
pub fn strip_code_fence(content: &str) -> &str {
    let content = content.trim();
    let after_open = if let Some((_, rest)) = content.split_once("```json") {
        rest
    } else if let Some((_, rest)) = content.split_once("```") {
        rest
    } else {
        return content;
    };
    after_open
        .split_once("```")
        .map_or(after_open, |(body, _)| body)
        .trim()
}

/// Decode a raw completion.
#[must_use]
pub fn parse_response(content: &str) -> ParsedResponse {
    let body = strip_code_fence(content);
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            let text = |key: &str| {
                map.get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            let classification = map
                .get("classification")
                .and_then(Value::as_str)
                .unwrap_or("WARNING")
                .to_uppercase();
            let triggers = map
                .get("triggers_detected")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| serde_json::from_value::<Trigger>(item.clone()).ok())
                        .collect()
                })
                .unwrap_or_default();

            ParsedResponse::Parsed {
                classification,
                reason: text("reason"),
                triggers,
                psychological_impact: text("psychological_impact"),
            }
        }
        _ => ParsedResponse::Fallback {
            classification: find_keyword(content),
        },
    }
}

/// First classification keyword contained in `text`, ignoring case, checked
/// in the order CRITICAL, WARNING, OPPORTUNITY.
#[must_use]
pub fn find_keyword(text: &str) -> Option<Classification> {
    let upper = text.to_uppercase();
    Classification::ALL
        .into_iter()
        .find(|c| upper.contains(c.as_str()))
}

/// Map a raw label to a verdict: exact match, then keyword search, then
/// [`Classification::Warning`].
#[must_use]
pub fn validate_classification(label: &str) -> Classification {
    Classification::ALL
        .into_iter()
        .find(|c| c.as_str() == label)
        .or_else(|| find_keyword(label))
        .unwrap_or(Classification::Warning)
}

impl ParsedResponse {
    /// Validate into a final result.
    #[must_use]
    pub fn into_result(self) -> ClassificationResult {
        match self {
            ParsedResponse::Parsed {
                classification,
                reason,
                triggers,
                psychological_impact,
            } => ClassificationResult::new(
                validate_classification(&classification),
                reason,
                triggers,
                psychological_impact,
            ),
            ParsedResponse::Fallback { classification } => ClassificationResult::new(
                classification.unwrap_or(Classification::Warning),
                String::new(),
                Vec::new(),
                String::new(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "response_test.rs"]
mod tests;
