//! Intent predictor trait

use crate::IntentPrediction;

/// Anything that can map an utterance to intent labels
///
/// Implementations must be deterministic for a fixed model/table, and the
/// confidences of different implementations must be comparable.
pub trait IntentPredictor: Send + Sync {
    /// Best label for `text`
    ///
    /// Implementations that cannot reach `threshold` may return their best
    /// low-confidence guess or [`IntentPrediction::unknown`].
    fn predict(&self, text: &str, threshold: f32) -> IntentPrediction;

    /// Up to `k` candidates, highest confidence first
    fn top_k(&self, text: &str, k: usize) -> Vec<IntentPrediction>;

    /// Predictor name for logging
    fn name(&self) -> &str {
        "predictor"
    }
}

impl<P: IntentPredictor + ?Sized> IntentPredictor for std::sync::Arc<P> {
    fn predict(&self, text: &str, threshold: f32) -> IntentPrediction {
        (**self).predict(text, threshold)
    }

    fn top_k(&self, text: &str, k: usize) -> Vec<IntentPrediction> {
        (**self).top_k(text, k)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
