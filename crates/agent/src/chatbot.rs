//! Hotel chatbot orchestrator
//!
//! One turn: validate -> predict -> threshold -> extract -> respond -> log.
//! The knowledge base, predictor and extractor live in [`ChatbotResources`]
//! and are shared between sessions; each [`HotelChatbot`] owns only its
//! conversation context.

use hotel_concierge_core::{
    Entities, HotelInfo, IntentPrediction, IntentPredictor, TurnResult, INVALID_INPUT_INTENT,
    UNKNOWN_INTENT,
};
use hotel_concierge_text_processing::{EntityExtractor, InputValidator};
use serde::Serialize;
use std::sync::Arc;

use crate::context::{ConversationContext, MessageRole};
use crate::dialogue::DialogueManager;
use crate::pricing::PriceEstimator;

/// Phrasings answered with a self-introduction when no intent is recognized
const IDENTITY_PHRASES: [&str; 3] = ["who are you", "what are you", "who r you"];

/// Read-only state shared by every session
pub struct ChatbotResources {
    hotel: Arc<HotelInfo>,
    validator: InputValidator,
    extractor: EntityExtractor,
    predictor: Arc<dyn IntentPredictor>,
    dialogue: DialogueManager,
    confidence_threshold: f32,
}

impl std::fmt::Debug for ChatbotResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatbotResources")
            .field("predictor", &self.predictor.name())
            .field("rooms", &self.hotel.room_types.len())
            .field("confidence_threshold", &self.confidence_threshold)
            .finish()
    }
}

impl ChatbotResources {
    pub fn new(
        hotel: Arc<HotelInfo>,
        predictor: Arc<dyn IntentPredictor>,
        pricing: PriceEstimator,
        confidence_threshold: f32,
    ) -> Self {
        Self {
            extractor: EntityExtractor::new(&hotel),
            dialogue: DialogueManager::new(hotel.clone(), pricing),
            validator: InputValidator::new(),
            hotel,
            predictor,
            confidence_threshold,
        }
    }

    pub fn hotel(&self) -> &HotelInfo {
        &self.hotel
    }

    pub fn predictor(&self) -> &dyn IntentPredictor {
        self.predictor.as_ref()
    }

    pub fn extractor(&self) -> &EntityExtractor {
        &self.extractor
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }
}

/// Ranked predictions and entities for one utterance
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub predictions: Vec<IntentPrediction>,
    pub entities: Entities,
}

/// A single guest conversation
#[derive(Debug)]
pub struct HotelChatbot {
    resources: Arc<ChatbotResources>,
    context: ConversationContext,
}

impl HotelChatbot {
    pub fn new(resources: Arc<ChatbotResources>) -> Self {
        let context = ConversationContext::for_hotel(&resources.hotel);
        Self { resources, context }
    }

    pub fn resources(&self) -> &Arc<ChatbotResources> {
        &self.resources
    }

    /// Process one user message
    pub fn respond(&mut self, text: &str) -> TurnResult {
        let validation = self.resources.validator.validate(text);
        if !validation.is_valid {
            tracing::debug!(reason = ?validation.reason(), "Input rejected");
            return TurnResult {
                intent: INVALID_INPUT_INTENT.to_string(),
                confidence: 0.0,
                entities: Entities::new(text),
                response: validation.message.to_string(),
                context_summary: self.context.context_summary(),
                validation: Some(validation.analysis),
            };
        }

        let threshold = self.resources.confidence_threshold;
        let prediction = self.resources.predictor.predict(text, threshold);
        let intent = if prediction.meets(threshold) {
            prediction.intent.as_str()
        } else {
            UNKNOWN_INTENT
        };

        let entities = self.resources.extractor.extract(text);
        let mut reply = self
            .resources
            .dialogue
            .respond(&mut self.context, intent, &entities);

        if intent == UNKNOWN_INTENT && is_identity_question(text) {
            reply = identity_reply(self.context.hotel_name());
        }

        tracing::debug!(
            intent,
            confidence = prediction.confidence,
            slots = ?entities.filled_slots(),
            "Turn handled"
        );

        self.context.add_message(MessageRole::User, text, None);
        self.context
            .add_message(MessageRole::Assistant, reply.clone(), Some(intent));

        TurnResult {
            intent: intent.to_string(),
            confidence: prediction.confidence,
            entities,
            response: reply,
            context_summary: self.context.context_summary(),
            validation: None,
        }
    }

    /// Top-k predictions and entities without touching the conversation
    pub fn analyze(&self, text: &str, k: usize) -> Analysis {
        Analysis {
            predictions: self.resources.predictor.top_k(text, k),
            entities: self.resources.extractor.extract(text),
        }
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn context_summary(&self) -> String {
        self.context.context_summary()
    }

    /// Forget booking state and history; the hotel identity stays
    pub fn reset_context(&mut self) {
        self.context.reset();
    }
}

fn is_identity_question(text: &str) -> bool {
    let lower = text.to_lowercase();
    IDENTITY_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

fn identity_reply(hotel_name: &str) -> String {
    format!(
        "I'm a hotel reservation assistant for {}. I can help with room bookings, availability, \
         pricing, amenities, and hotel policies. What would you like to know?",
        hotel_name
    )
}
