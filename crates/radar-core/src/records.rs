//! Record store: question/answer records and their enrichment fields.
//!
//! Input is either a phpMyAdmin-style export (an array of blocks where the
//! `"type": "table"` blocks carry a `data` array of records) or a flat array of
//! records. Output is always a flat, pretty-printed array. Fields this crate
//! does not know about are carried through untouched.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access record store {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse record store {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize records: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Sentiment verdict for a brand within one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Critical,
    Warning,
    Opportunity,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::Critical,
        Classification::Warning,
        Classification::Opportunity,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Critical => "CRITICAL",
            Classification::Warning => "WARNING",
            Classification::Opportunity => "OPPORTUNITY",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A negative or cautionary phrase flagged by the classification service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub trigger: String,
    /// `WARNING` or `CRITICAL` as reported by the service.
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub context: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub question_text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub answer: String,

    /// Category id; `0` marks an unmatched question.
    #[serde(rename = "category", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_list: Option<Vec<String>>,
    /// 1-based rank of the main brand; `null` when it is not in the ranking.
    #[serde(default)]
    pub position: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers_detected: Option<Vec<Trigger>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psychological_impact: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new(question_text: &str, answer: &str) -> Self {
        Self {
            question_text: question_text.to_string(),
            answer: answer.to_string(),
            ..Self::default()
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Parse records from the text of a record store.
///
/// # Errors
///
/// Returns the underlying `serde_json::Error` if the document is not an array
/// or a record has fields of the wrong type.
pub fn parse_records(content: &str) -> Result<Vec<Record>, serde_json::Error> {
    let items: Vec<Value> = serde_json::from_str(content)?;
    let mut records = Vec::new();

    for item in items {
        match item.get("type").and_then(Value::as_str) {
            Some("table") => {
                if let Some(Value::Array(rows)) = item.get("data") {
                    for row in rows {
                        records.push(Record::deserialize(row)?);
                    }
                }
            }
            // Export headers and database markers carry no records.
            Some(_) => {}
            None => records.push(serde_json::from_value(item)?),
        }
    }

    Ok(records)
}

/// Load all records from a JSON record store.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be read and
/// [`StoreError::Parse`] if its content is not a valid record store.
pub fn load_records(path: &Path) -> Result<Vec<Record>, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_records(&content).map_err(|e| StoreError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write records as a flat, pretty-printed JSON array.
///
/// Non-ASCII text is written as-is, not escaped.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] or [`StoreError::Io`].
pub fn write_records(path: &Path, records: &[Record]) -> Result<(), StoreError> {
    let body = serde_json::to_string_pretty(records).map_err(StoreError::Serialize)?;
    std::fs::write(path, body).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
