//! Multi-turn conversations against the bundled knowledge base and training set
//!
//! The classifier is trained once and shared by every test.

use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Arc;

use hotel_concierge_agent::{
    build_resources, train_classifier, AgentError, ChatbotResources, HotelChatbot, PriceEstimator,
};
use hotel_concierge_config::{load_knowledge_base, DataPaths, Settings};
use hotel_concierge_core::{IntentPrediction, IntentPredictor, RejectionReason};
use hotel_concierge_text_processing::{KeywordFallback, StatisticalClassifier, TextProcessingError};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.data = DataPaths::in_dir(data_dir());
    settings
}

static CLASSIFIER: Lazy<StatisticalClassifier> =
    Lazy::new(|| train_classifier(&settings()).unwrap());

static RESOURCES: Lazy<Arc<ChatbotResources>> = Lazy::new(|| {
    let settings = settings();
    let hotel = Arc::new(load_knowledge_base(data_dir()).unwrap());
    Arc::new(ChatbotResources::new(
        hotel,
        Arc::new(KeywordFallback::new(CLASSIFIER.clone())),
        PriceEstimator::from_config(&settings.pricing),
        settings.classifier.confidence_threshold,
    ))
});

fn chatbot() -> HotelChatbot {
    HotelChatbot::new(RESOURCES.clone())
}

/// Nightly price quoted in a reply ("... $203.17 per night ...")
fn quoted_price(reply: &str) -> f64 {
    let after = reply.split('$').nth(1).expect("reply quotes a price");
    let number: String = after
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    number.trim_end_matches('.').parse().unwrap()
}

#[test]
fn test_keyboard_mash_is_rejected() {
    let mut bot = chatbot();
    let turn = bot.respond("asdfghjkl");

    assert_eq!(turn.intent, "invalid_input");
    assert_eq!(turn.confidence, 0.0);
    assert_eq!(turn.rejection_reason(), Some(RejectionReason::GibberishPattern));
    assert!(turn.response.starts_with("That doesn't seem like a valid question."));
    assert!(bot.context().history().is_empty());
}

#[test]
fn test_repeated_words_are_rejected() {
    let mut bot = chatbot();
    let turn = bot.respond("book book book book");
    assert_eq!(turn.rejection_reason(), Some(RejectionReason::RepeatedWords));
    assert_eq!(turn.context_summary, "Hotel: Sunset Bay Hotel");
}

#[test]
fn test_two_dates_fill_check_in_and_check_out() {
    let mut bot = chatbot();
    let turn = bot.respond("I want to book from 2025-12-10 to 2025-12-12");

    assert!(turn.validation.is_none());
    assert_eq!(turn.entities.check_in.as_deref(), Some("2025-12-10"));
    assert_eq!(turn.entities.check_out.as_deref(), Some("2025-12-12"));
    assert!(turn.context_summary.contains("Dates: 2025-12-10 to 2025-12-12"));
    assert_eq!(bot.context().history().len(), 2);
}

#[test]
fn test_room_is_remembered_for_price_question() {
    let mut bot = chatbot();

    let first = bot.respond("book a deluxe room for 2 adults");
    assert_eq!(first.intent, "make_reservation");
    assert_eq!(first.entities.room_code.as_deref(), Some("DLX"));
    assert_eq!(first.entities.adults, Some(2));
    assert!(first.context_summary.contains("Room: Deluxe King Room"));
    assert!(first.context_summary.contains("Guests: 2 guests"));

    let second = bot.respond("how much will it cost");
    assert_eq!(second.intent, "inquire_price");
    assert!(second.response.contains("Deluxe King Room"));

    // no check-in date: weekday base of 189
    let price = quoted_price(&second.response);
    assert!(
        (189.0 * 0.95 - 0.01..=189.0 * 1.15 + 0.01).contains(&price),
        "price {} out of range",
        price
    );
}

#[test]
fn test_weekend_check_in_uses_weekend_rate() {
    let mut bot = chatbot();
    // 2025-12-12 is a Friday
    bot.respond("book a deluxe room from 2025-12-12 to 2025-12-14");
    let turn = bot.respond("how much will it cost");

    let price = quoted_price(&turn.response);
    assert!((229.0 * 0.95 - 0.01..=229.0 * 1.15 + 0.01).contains(&price));
}

#[test]
fn test_identity_question_is_answered() {
    let mut bot = chatbot();
    let turn = bot.respond("who are you");
    assert_eq!(turn.intent, "inquire_identity");
    assert!(turn.response.contains("Sunset Bay Hotel"));
}

#[test]
fn test_statistical_model_is_confident_on_hotel_questions() {
    let threshold = settings().classifier.confidence_threshold;
    for (text, intent) in [
        ("book a deluxe room for 2 adults", "make_reservation"),
        ("how much will it cost", "inquire_price"),
        ("what time is check out", "inquire_checkout_time"),
        ("who are you", "inquire_identity"),
        ("cancel my booking", "cancel_reservation"),
        ("do you allow pets", "inquire_pet_policy"),
        ("is parking available for my car", "inquire_parking"),
    ] {
        let statistical = CLASSIFIER.predict(text, threshold);
        assert_eq!(statistical.intent, intent, "{}", text);
        assert!(
            statistical.confidence >= threshold,
            "{}: {} below threshold",
            text,
            statistical.confidence
        );

        // the keyword rules are not consulted
        let hybrid = RESOURCES.predictor().predict(text, threshold);
        assert_eq!(hybrid, statistical, "{}", text);
    }
}

/// Statistical stand-in that is never confident
struct Unsure;

impl IntentPredictor for Unsure {
    fn predict(&self, _text: &str, _threshold: f32) -> IntentPrediction {
        IntentPrediction::new("make_reservation", 0.1)
    }

    fn top_k(&self, _text: &str, _k: usize) -> Vec<IntentPrediction> {
        vec![IntentPrediction::new("make_reservation", 0.1)]
    }
}

#[test]
fn test_keyword_fallback_rescues_identity_question() {
    let resources = ChatbotResources::new(
        Arc::new(RESOURCES.hotel().clone()),
        Arc::new(KeywordFallback::new(Unsure)),
        PriceEstimator::default(),
        0.25,
    );
    let mut bot = HotelChatbot::new(Arc::new(resources));

    let turn = bot.respond("who are you");
    assert_eq!(turn.intent, "inquire_identity");
    assert!((turn.confidence - 0.72).abs() < 1e-6);
}

#[test]
fn test_unknown_without_fallback_gets_self_introduction() {
    let resources = ChatbotResources::new(
        Arc::new(RESOURCES.hotel().clone()),
        Arc::new(Unsure),
        PriceEstimator::default(),
        0.25,
    );
    let mut bot = HotelChatbot::new(Arc::new(resources));

    let turn = bot.respond("who are you?");
    assert_eq!(turn.intent, "unknown");
    assert!(turn
        .response
        .starts_with("I'm a hotel reservation assistant for Sunset Bay Hotel."));
}

#[test]
fn test_reset_keeps_hotel_identity() {
    let mut bot = chatbot();
    bot.respond("book a family suite for 2 adults and 2 children from 2025-12-10 to 2025-12-12");
    assert!(bot.context().has_partial_booking());

    bot.reset_context();
    assert!(!bot.context().has_partial_booking());
    assert!(bot.context().history().is_empty());
    assert_eq!(bot.context_summary(), "Hotel: Sunset Bay Hotel");
}

#[test]
fn test_sessions_are_isolated() {
    let mut first = chatbot();
    let second = chatbot();
    first.respond("book a deluxe room for 2 adults");

    assert!(first.context().has_partial_booking());
    assert!(!second.context().has_partial_booking());
}

#[test]
fn test_analyze_returns_ranked_predictions() {
    let bot = chatbot();
    let analysis = bot.analyze("is parking available for my car", 3);

    assert!(!analysis.predictions.is_empty() && analysis.predictions.len() <= 3);
    assert!(analysis
        .predictions
        .windows(2)
        .all(|w| w[0].confidence >= w[1].confidence));
    assert_eq!(analysis.entities.amenity.as_deref(), Some("parking"));
}

#[test]
fn test_training_twice_gives_same_top_label() {
    let mut settings = settings();
    settings.classifier.max_iter = 200;
    let a = train_classifier(&settings).unwrap();
    let b = train_classifier(&settings).unwrap();

    for text in ["hello", "what time is check out", "do you allow pets", "cancel my booking"] {
        assert_eq!(a.predict(text, 0.0).intent, b.predict(text, 0.0).intent);
    }
}

#[test]
fn test_auto_train_persists_and_load_only_mode_reuses_it() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings();
    settings.classifier.max_iter = 100;
    settings.classifier.model_path = dir.path().join("intent_classifier.json");

    build_resources(&settings).unwrap();
    assert!(settings.classifier.model_path.exists());

    settings.classifier.auto_train = false;
    let resources = build_resources(&settings).unwrap();
    assert_eq!(resources.hotel().room_types.len(), 4);
}

#[test]
fn test_auto_train_overwrites_existing_model() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings();
    settings.classifier.max_iter = 50;
    settings.classifier.model_path = dir.path().join("intent_classifier.json");
    std::fs::write(&settings.classifier.model_path, "not a model").unwrap();

    assert!(matches!(
        StatisticalClassifier::load(&settings.classifier.model_path),
        Err(TextProcessingError::ModelLoad(_))
    ));

    build_resources(&settings).unwrap();
    let reloaded = StatisticalClassifier::load(&settings.classifier.model_path).unwrap();
    assert_eq!(reloaded.labels().len(), 28);
}

#[test]
fn test_load_only_mode_without_model_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings();
    settings.classifier.auto_train = false;
    settings.classifier.model_path = dir.path().join("missing.json");

    let result = build_resources(&settings);
    assert!(matches!(
        result,
        Err(AgentError::TextProcessing(TextProcessingError::ModelNotFound(_)))
    ));
}

#[test]
fn test_missing_training_data_fails() {
    let mut settings = settings();
    settings.data.training_data = data_dir().join("does_not_exist.yaml");
    assert!(matches!(train_classifier(&settings), Err(AgentError::Config(_))));
}
