//! Text processing for the hotel concierge
//!
//! This crate provides the NLU stages that run on every turn:
//! - **Input Validation**: reject empty, gibberish and off-topic input
//! - **Entity Extraction**: dates, guest counts, rooms, amenities, times
//! - **Keyword Matching**: rule-based intent scoring over a static table
//! - **Statistical Classification**: TF-IDF + logistic regression, with a
//!   keyword fallback for low-confidence predictions
//!
//! # Example
//!
//! ```ignore
//! use hotel_concierge_text_processing::{
//!     InputValidator, KeywordFallback, StatisticalClassifier, TrainingOptions,
//! };
//!
//! let classifier = StatisticalClassifier::train(&rows, &TrainingOptions::default())?;
//! let hybrid = KeywordFallback::new(classifier);
//!
//! if InputValidator::new().validate(text).is_valid {
//!     let prediction = hybrid.predict(text, 0.25);
//! }
//! ```

pub mod classifier;
pub mod entities;
pub mod intent;
pub mod validation;

mod error;

pub use error::{Result, TextProcessingError};

pub use classifier::{
    KeywordFallback, MultinomialLogisticRegression, SolverOptions, StatisticalClassifier,
    TfidfVectorizer, TrainingOptions,
};
pub use entities::{EntityExtractor, RoomSynonym};
pub use intent::KeywordMatcher;
pub use validation::{guidance, GibberishPattern, InputValidator, Validation};
