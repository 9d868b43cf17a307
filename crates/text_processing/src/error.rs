//! Error types for text processing

use thiserror::Error;

/// Text processing errors
#[derive(Error, Debug)]
pub enum TextProcessingError {
    /// No persisted model at the given path
    #[error("Trained model not found at {0}; train the classifier first")]
    ModelNotFound(String),

    /// Persisted model exists but cannot be read
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Failed to save model: {0}")]
    ModelSave(String),

    #[error("No training data available")]
    EmptyTrainingData,

    /// Every training row carries the same label
    #[error("Training data needs at least two intents, found only '{0}'")]
    SingleLabel(String),

    #[error("Invalid training option: {0}")]
    InvalidOption(String),
}

/// Result type for text processing
pub type Result<T> = std::result::Result<T, TextProcessingError>;
