//! Startup: load the knowledge base, train or load the classifier and wire
//! the shared chatbot resources
//!
//! Every failure here is fatal for the caller; nothing retries.

use hotel_concierge_config::{load_hotel_info, load_training_data, Settings};
use hotel_concierge_core::{IntentPredictor, TrainingRow};
use hotel_concierge_text_processing::{
    KeywordFallback, SolverOptions, StatisticalClassifier, TrainingOptions,
};
use rand::seq::SliceRandom;
use std::sync::Arc;

use crate::chatbot::ChatbotResources;
use crate::pricing::PriceEstimator;
use crate::AgentError;

/// Classifier hyper-parameters from settings
pub fn training_options(settings: &Settings) -> TrainingOptions {
    let c = &settings.classifier;
    TrainingOptions {
        max_features: c.max_features,
        solver: SolverOptions {
            max_iter: c.max_iter,
            learning_rate: c.learning_rate,
            l2: c.l2,
        },
    }
}

/// Load the training set, down-sample it and fit a classifier
pub fn train_classifier(settings: &Settings) -> Result<StatisticalClassifier, AgentError> {
    let rows = load_training_data(&settings.data.training_data)?;
    let rows = sample_rows(rows, settings.classifier.max_training_rows);
    Ok(StatisticalClassifier::train(&rows, &training_options(settings))?)
}

/// Keep at most `max_rows` rows, chosen uniformly at random
fn sample_rows(rows: Vec<TrainingRow>, max_rows: Option<usize>) -> Vec<TrainingRow> {
    match max_rows {
        Some(max) if rows.len() > max => {
            tracing::info!(total = rows.len(), kept = max, "Down-sampling training data");
            rows.choose_multiple(&mut rand::thread_rng(), max)
                .cloned()
                .collect()
        }
        _ => rows,
    }
}

/// Build the shared resources described by `settings`
///
/// With `auto_train` the classifier is fitted from the training set and
/// persisted to `model_path`; otherwise the persisted model must exist.
pub fn build_resources(settings: &Settings) -> Result<ChatbotResources, AgentError> {
    let hotel = Arc::new(load_hotel_info(&settings.data)?);
    let classifier_config = &settings.classifier;

    let classifier = if classifier_config.auto_train {
        let classifier = train_classifier(settings)?;
        classifier.save(&classifier_config.model_path)?;
        classifier
    } else {
        StatisticalClassifier::load(&classifier_config.model_path)?
    };

    let predictor: Arc<dyn IntentPredictor> = if classifier_config.use_keyword_fallback {
        Arc::new(KeywordFallback::new(classifier))
    } else {
        Arc::new(classifier)
    };

    tracing::info!(
        hotel = hotel.hotel_name().unwrap_or_default(),
        rooms = hotel.room_types.len(),
        predictor = predictor.name(),
        threshold = classifier_config.confidence_threshold,
        "Chatbot resources ready"
    );

    Ok(ChatbotResources::new(
        hotel,
        predictor,
        PriceEstimator::from_config(&settings.pricing),
        classifier_config.confidence_threshold,
    ))
}
