//! Rule-based intent matching
//!
//! Scores every intent in [`INTENT_KEYWORDS`] against the lower-cased
//! utterance. Used as the fallback behind the statistical classifier and as
//! a source of ranked candidates.
//!
//! # Scoring
//!
//! - any keyword of any group found as a substring: 3.0
//! - otherwise every group covered: 2.0
//! - otherwise fraction of covered groups x 1.0
//!
//! Confidence is `min(score / 5, 1)`.
//!
//! # Example
//!
//! ```
//! use hotel_concierge_text_processing::intent::KeywordMatcher;
//!
//! let matcher = KeywordMatcher::new();
//! let best = matcher.best_match("who are you", 1.0).unwrap();
//!
//! assert_eq!(best.intent, "inquire_identity");
//! ```

mod table;

pub use table::{IntentKeywords, INTENT_KEYWORDS};

use hotel_concierge_core::{IntentPrediction, IntentPredictor};

/// Score for a keyword found verbatim
pub const EXACT_PHRASE_WEIGHT: f32 = 3.0;
/// Score when every keyword group is covered
pub const ALL_GROUPS_WEIGHT: f32 = 2.0;
/// Multiplier for the covered-group fraction
pub const PARTIAL_WEIGHT: f32 = 1.0;
/// Raw score mapped to confidence 1.0
pub const SCORE_SCALE: f32 = 5.0;
/// Minimum raw score accepted by [`KeywordMatcher::predict`]
pub const DEFAULT_MIN_SCORE: f32 = 1.0;

/// Deterministic keyword scorer over a static table
#[derive(Debug, Clone, Copy)]
pub struct KeywordMatcher {
    table: &'static [IntentKeywords],
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordMatcher {
    pub fn new() -> Self {
        Self {
            table: INTENT_KEYWORDS,
        }
    }

    /// Best-scoring intent if its raw score reaches `min_score`
    pub fn best_match(&self, text: &str, min_score: f32) -> Option<IntentPrediction> {
        let text = text.to_lowercase();
        let mut best: Option<(&str, f32)> = None;

        for entry in self.table {
            let score = score_groups(&text, entry.groups);
            if score > best.map(|(_, s)| s).unwrap_or(0.0) {
                best = Some((entry.intent, score));
            }
        }

        best.filter(|(_, score)| *score >= min_score)
            .map(|(intent, score)| IntentPrediction::new(intent, normalize(score)))
    }

    /// Intents with a positive score, best first, at most `k`
    pub fn rank(&self, text: &str, k: usize) -> Vec<IntentPrediction> {
        let text = text.to_lowercase();
        let mut scored: Vec<IntentPrediction> = self
            .table
            .iter()
            .filter_map(|entry| {
                let score = score_groups(&text, entry.groups);
                (score > 0.0).then(|| IntentPrediction::new(entry.intent, normalize(score)))
            })
            .collect();

        // stable: equal confidences keep table order
        scored.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        scored.truncate(k);
        scored
    }
}

fn normalize(score: f32) -> f32 {
    (score / SCORE_SCALE).min(1.0)
}

/// Raw score of one intent's groups against lower-cased text
pub fn score_groups(text: &str, groups: &[&[&str]]) -> f32 {
    if groups.is_empty() {
        return 0.0;
    }

    if groups
        .iter()
        .any(|group| group.iter().any(|phrase| text.contains(phrase)))
    {
        return EXACT_PHRASE_WEIGHT;
    }

    let covered = groups
        .iter()
        .filter(|group| group.iter().any(|keyword| text.contains(keyword)))
        .count();

    if covered == groups.len() {
        ALL_GROUPS_WEIGHT
    } else if covered > 0 {
        PARTIAL_WEIGHT * covered as f32 / groups.len() as f32
    } else {
        0.0
    }
}

impl IntentPredictor for KeywordMatcher {
    fn predict(&self, text: &str, _threshold: f32) -> IntentPrediction {
        self.best_match(text, DEFAULT_MIN_SCORE)
            .unwrap_or_else(IntentPrediction::unknown)
    }

    fn top_k(&self, text: &str, k: usize) -> Vec<IntentPrediction> {
        self.rank(text, k)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
