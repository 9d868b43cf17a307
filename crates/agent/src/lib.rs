//! Conversational layer of the hotel concierge
//!
//! Features:
//! - Per-session conversation context (booking slots, history, preferences)
//! - Template-driven dialogue management with simulated pricing
//! - `HotelChatbot` turn orchestration over shared, read-only resources
//! - Startup bootstrap: knowledge base loading and classifier train-or-load

pub mod bootstrap;
pub mod chatbot;
pub mod context;
pub mod dialogue;
pub mod pricing;

pub use bootstrap::{build_resources, train_classifier, training_options};
pub use chatbot::{Analysis, ChatbotResources, HotelChatbot};
pub use context::{
    BookingSlots, ConversationContext, HistoryMessage, HotelIdentity, MessageRole, Preferences,
};
pub use dialogue::{DialogueManager, DEFAULT_RESPONSE};
pub use pricing::PriceEstimator;

use hotel_concierge_config::ConfigError;
use hotel_concierge_text_processing::TextProcessingError;
use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Text processing error: {0}")]
    TextProcessing(#[from] TextProcessingError),
}
