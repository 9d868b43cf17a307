//! Core traits and types for the hotel concierge
//!
//! This crate provides foundational types used across all other crates:
//! - Knowledge base types (hotel metadata, room catalog, FAQ, templates)
//! - Training rows for the statistical intent classifier
//! - Intent predictions, extracted entities and turn results
//! - The `IntentPredictor` trait shared by statistical and rule-based predictors
//! - Error types

pub mod entities;
pub mod error;
pub mod intent;
pub mod knowledge;
pub mod training;
pub mod traits;
pub mod turn;

pub use entities::Entities;
pub use error::{Error, Result};
pub use intent::{IntentPrediction, INVALID_INPUT_INTENT, UNKNOWN_INTENT};
pub use knowledge::{HotelInfo, RoomType};
pub use training::TrainingRow;
pub use traits::IntentPredictor;
pub use turn::{RejectionReason, TurnResult, ValidationAnalysis, ValidationDiagnostics};
