//! Statistical intent classification
//!
//! A TF-IDF featurizer (unigrams + bigrams) feeding a multinomial logistic
//! regression. A [`StatisticalClassifier`] only comes into existence through
//! [`StatisticalClassifier::train`] or [`StatisticalClassifier::load`], so an
//! untrained classifier cannot be queried.
//!
//! [`KeywordFallback`] composes it with the keyword matcher into the hybrid
//! predictor used by the chatbot.

pub mod fallback;
pub mod logreg;
pub mod tfidf;

pub use fallback::{KeywordFallback, KEYWORD_BOOST, KEYWORD_CONFIDENCE_CAP};
pub use logreg::{MultinomialLogisticRegression, SolverOptions};
pub use tfidf::{SparseVector, TfidfVectorizer};

use hotel_concierge_core::{IntentPrediction, IntentPredictor, TrainingRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::{Result, TextProcessingError};

/// Hyper-parameters for fitting the classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingOptions {
    /// Vocabulary cap
    pub max_features: usize,
    pub solver: SolverOptions,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            max_features: 6000,
            solver: SolverOptions::default(),
        }
    }
}

/// Trained TF-IDF + logistic regression intent classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticalClassifier {
    /// Sorted intent labels, one per model column
    labels: Vec<String>,
    vectorizer: TfidfVectorizer,
    model: MultinomialLogisticRegression,
}

impl StatisticalClassifier {
    /// Fit on labeled utterances
    pub fn train(rows: &[TrainingRow], options: &TrainingOptions) -> Result<Self> {
        if rows.is_empty() {
            return Err(TextProcessingError::EmptyTrainingData);
        }

        let labels: Vec<String> = rows
            .iter()
            .map(|row| row.intent.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if labels.len() < 2 {
            return Err(TextProcessingError::SingleLabel(labels[0].clone()));
        }

        let utterances: Vec<&str> = rows.iter().map(|row| row.utterance.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&utterances, options.max_features)?;

        let features: Vec<SparseVector> = utterances
            .iter()
            .map(|text| vectorizer.transform(text))
            .collect();
        let targets: Vec<usize> = rows
            .iter()
            .map(|row| labels.binary_search(&row.intent).unwrap_or(0))
            .collect();

        let model = MultinomialLogisticRegression::fit(
            &features,
            &targets,
            vectorizer.nb_features(),
            labels.len(),
            &options.solver,
        )?;

        tracing::info!(
            rows = rows.len(),
            intents = labels.len(),
            features = vectorizer.nb_features(),
            iterations = options.solver.max_iter,
            "Trained intent classifier"
        );

        Ok(Self {
            labels,
            vectorizer,
            model,
        })
    }

    /// Persist as JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| TextProcessingError::ModelSave(format!("{}: {}", parent.display(), e)))?;
        }

        let json = serde_json::to_string(self)
            .map_err(|e| TextProcessingError::ModelSave(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| TextProcessingError::ModelSave(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Saved intent classifier");
        Ok(())
    }

    /// Load a persisted classifier
    ///
    /// A missing file is [`TextProcessingError::ModelNotFound`]; an unreadable
    /// or inconsistent one is [`TextProcessingError::ModelLoad`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TextProcessingError::ModelNotFound(
                path.display().to_string(),
            ));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| TextProcessingError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        let classifier: Self = serde_json::from_str(&content)
            .map_err(|e| TextProcessingError::ModelLoad(format!("{}: {}", path.display(), e)))?;

        classifier.check()?;
        tracing::info!(
            path = %path.display(),
            intents = classifier.labels.len(),
            "Loaded intent classifier"
        );
        Ok(classifier)
    }

    fn check(&self) -> Result<()> {
        self.vectorizer.check()?;
        if self.model.nb_classes() != self.labels.len()
            || self.model.nb_features() != self.vectorizer.nb_features()
        {
            return Err(TextProcessingError::ModelLoad(
                "model dimensions do not match labels and vocabulary".to_string(),
            ));
        }
        Ok(())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Probability for every label, in label order
    pub fn predict_proba(&self, text: &str) -> Vec<IntentPrediction> {
        let features = self.vectorizer.transform(text);
        let probabilities = self.model.predict_proba(&features);
        self.labels
            .iter()
            .zip(probabilities.iter())
            .map(|(label, &p)| IntentPrediction::new(label.clone(), p))
            .collect()
    }
}

impl IntentPredictor for StatisticalClassifier {
    /// Top label regardless of threshold; ties go to the earlier label
    fn predict(&self, text: &str, _threshold: f32) -> IntentPrediction {
        self.predict_proba(text)
            .into_iter()
            .reduce(|best, p| if p.confidence > best.confidence { p } else { best })
            .unwrap_or_else(IntentPrediction::unknown)
    }

    fn top_k(&self, text: &str, k: usize) -> Vec<IntentPrediction> {
        let mut predictions = self.predict_proba(text);
        predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        predictions.truncate(k);
        predictions
    }

    fn name(&self) -> &str {
        "statistical"
    }
}
