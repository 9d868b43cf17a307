//! Per-turn results and validation diagnostics

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Entities;

/// Why the input validator rejected an utterance
///
/// The snake_case code is part of the observable turn contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    Empty,
    TooShort,
    GibberishPattern,
    RepeatedWords,
    GibberishWord,
    SingleInvalidWord,
    LowWordValidity,
    OffTopicDetected,
    OffTopic,
    UnclearIntent,
}

impl RejectionReason {
    pub const ALL: [RejectionReason; 10] = [
        RejectionReason::Empty,
        RejectionReason::TooShort,
        RejectionReason::GibberishPattern,
        RejectionReason::RepeatedWords,
        RejectionReason::GibberishWord,
        RejectionReason::SingleInvalidWord,
        RejectionReason::LowWordValidity,
        RejectionReason::OffTopicDetected,
        RejectionReason::OffTopic,
        RejectionReason::UnclearIntent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::Empty => "empty",
            RejectionReason::TooShort => "too_short",
            RejectionReason::GibberishPattern => "gibberish_pattern",
            RejectionReason::RepeatedWords => "repeated_words",
            RejectionReason::GibberishWord => "gibberish_word",
            RejectionReason::SingleInvalidWord => "single_invalid_word",
            RejectionReason::LowWordValidity => "low_word_validity",
            RejectionReason::OffTopicDetected => "off_topic_detected",
            RejectionReason::OffTopic => "off_topic",
            RejectionReason::UnclearIntent => "unclear_intent",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexical diagnostics computed once the cheap structural checks pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationDiagnostics {
    pub has_question_word: bool,
    pub has_question_mark: bool,
    pub has_domain_keyword: bool,
    /// Share of alphabetic tokens passing the real-word heuristic
    pub word_validity_ratio: f32,
    pub word_count: usize,
}

/// Outcome of one validator call
///
/// Early rejections (empty, gibberish, repetition) carry no diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectionReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<ValidationDiagnostics>,
}

impl ValidationAnalysis {
    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            reason: Some(reason),
            diagnostics: None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.reason.is_some()
    }
}

/// Result of one chatbot turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub intent: String,
    pub confidence: f32,
    pub entities: Entities,
    pub response: String,
    pub context_summary: String,
    /// Present only when the input was rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationAnalysis>,
}

impl TurnResult {
    pub fn is_rejected(&self) -> bool {
        self.validation
            .as_ref()
            .map(|v| v.is_rejected())
            .unwrap_or(false)
    }

    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        self.validation.as_ref().and_then(|v| v.reason)
    }
}
