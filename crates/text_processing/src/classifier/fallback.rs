//! Keyword fallback decorator
//!
//! Wraps a primary [`IntentPredictor`] and consults the [`KeywordMatcher`]
//! only when the primary is not confident enough:
//!
//! 1. primary top confidence >= threshold: primary wins
//! 2. keyword match with raw score >= 1.0: keyword intent, confidence
//!    `min(kw * 1.2, 0.95)`
//! 3. otherwise the low-confidence primary prediction, unchanged

use hotel_concierge_core::{IntentPrediction, IntentPredictor};

use crate::intent::{KeywordMatcher, DEFAULT_MIN_SCORE};

/// Multiplier applied to keyword confidence when it replaces the primary
pub const KEYWORD_BOOST: f32 = 1.2;
/// Upper bound for a boosted keyword confidence
pub const KEYWORD_CONFIDENCE_CAP: f32 = 0.95;

/// Hybrid predictor: primary first, keyword rules when the primary is unsure
#[derive(Debug, Clone)]
pub struct KeywordFallback<P> {
    primary: P,
    keywords: KeywordMatcher,
}

impl<P: IntentPredictor> KeywordFallback<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            keywords: KeywordMatcher::new(),
        }
    }
}

impl<P: IntentPredictor> IntentPredictor for KeywordFallback<P> {
    fn predict(&self, text: &str, threshold: f32) -> IntentPrediction {
        let primary = self.primary.predict(text, threshold);
        if primary.meets(threshold) {
            return primary;
        }

        match self.keywords.best_match(text, DEFAULT_MIN_SCORE) {
            Some(keyword) => {
                let confidence = (keyword.confidence * KEYWORD_BOOST).min(KEYWORD_CONFIDENCE_CAP);
                tracing::debug!(
                    primary = %primary.intent,
                    primary_confidence = primary.confidence,
                    intent = %keyword.intent,
                    confidence,
                    "Keyword fallback"
                );
                IntentPrediction::new(keyword.intent, confidence)
            }
            None => primary,
        }
    }

    /// Primary and keyword candidates merged by label, keeping the higher
    /// confidence per label
    fn top_k(&self, text: &str, k: usize) -> Vec<IntentPrediction> {
        let mut merged: Vec<IntentPrediction> = Vec::new();
        let candidates = self
            .primary
            .top_k(text, k)
            .into_iter()
            .chain(self.keywords.rank(text, k));

        for candidate in candidates {
            match merged.iter_mut().find(|p| p.intent == candidate.intent) {
                Some(existing) => {
                    if candidate.confidence > existing.confidence {
                        existing.confidence = candidate.confidence;
                    }
                }
                None => merged.push(candidate),
            }
        }

        merged.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        merged.truncate(k);
        merged
    }

    fn name(&self) -> &str {
        "keyword_fallback"
    }
}
