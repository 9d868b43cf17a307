//! Labeled utterances for fitting the statistical intent classifier

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One labeled training utterance
///
/// Only `utterance` and `intent` feed the classifier; the remaining tags are
/// carried for dataset bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub utterance: String,
    #[serde(default = "default_intent")]
    pub intent: String,
    #[serde(default)]
    pub entities: BTreeMap<String, serde_json::Value>,
    #[serde(default = "default_context")]
    pub context: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default = "default_sentiment")]
    pub sentiment: String,
}

fn default_intent() -> String {
    crate::UNKNOWN_INTENT.to_string()
}
fn default_context() -> String {
    "general".to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_channel() -> String {
    "web".to_string()
}
fn default_sentiment() -> String {
    "neutral".to_string()
}

impl TrainingRow {
    /// Row with default tags
    pub fn new(utterance: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
            intent: intent.into(),
            entities: BTreeMap::new(),
            context: default_context(),
            language: default_language(),
            channel: default_channel(),
            sentiment: default_sentiment(),
        }
    }
}
