//! Intent prediction types

use serde::{Deserialize, Serialize};

/// Intent used when neither the statistical model nor the keyword rules are
/// confident enough.
pub const UNKNOWN_INTENT: &str = "unknown";

/// Intent reported for turns rejected by the input validator.
pub const INVALID_INPUT_INTENT: &str = "invalid_input";

/// Intent label with a confidence normalized to [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPrediction {
    /// Intent label
    pub intent: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
}

impl IntentPrediction {
    pub fn new(intent: impl Into<String>, confidence: f32) -> Self {
        Self {
            intent: intent.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Zero-confidence `unknown` prediction
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_INTENT, 0.0)
    }

    pub fn is_unknown(&self) -> bool {
        self.intent == UNKNOWN_INTENT
    }

    /// Check the confidence against a threshold
    pub fn meets(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}
