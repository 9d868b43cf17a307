//! Core traits
//!
//! The statistical classifier and the keyword matcher are interchangeable
//! behind [`IntentPredictor`]; the hybrid classifier composes them.

mod predictor;

pub use predictor::IntentPredictor;
