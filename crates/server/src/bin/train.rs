//! Retrain the intent classifier from the configured training set
//!
//! Trains, persists to `classifier.model_path`, then runs a few sample
//! queries through a fresh chatbot as a smoke check.

use anyhow::Context;
use std::sync::Arc;

use hotel_concierge_agent::{build_resources, HotelChatbot};
use hotel_concierge_config::load_settings;
use hotel_concierge_server::init_tracing;

const SAMPLE_QUERIES: [&str; 4] = [
    "Do you have rooms available?",
    "What types of rooms do you offer?",
    "what is the check in time",
    "Tell me a joke",
];

fn main() -> anyhow::Result<()> {
    let env = std::env::var("HOTEL_CONCIERGE_ENV").ok();
    let mut config = load_settings(env.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.observability);

    config.classifier.auto_train = true;
    let resources = build_resources(&config).context("Training failed")?;
    tracing::info!(
        model_path = %config.classifier.model_path.display(),
        "Model trained and saved"
    );

    let mut bot = HotelChatbot::new(Arc::new(resources));
    for query in SAMPLE_QUERIES {
        let turn = bot.respond(query);
        tracing::info!(
            query,
            intent = %turn.intent,
            confidence = %format!("{:.2}", turn.confidence),
            "Sample prediction"
        );
    }

    Ok(())
}
