//! Configuration management for the hotel concierge
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (HOTEL_CONCIERGE_ prefix, `__` separator)
//!
//! The knowledge base (hotel metadata, room catalog, amenity FAQ, response
//! templates) and the labeled training set are YAML files under `data/`,
//! located through [`DataPaths`].

pub mod knowledge;
pub mod settings;
pub mod training;

pub use knowledge::{
    load_amenity_faq, load_hotel_info, load_hotel_metadata, load_knowledge_base,
    load_response_templates, load_room_types,
};
pub use settings::{
    load_settings, ClassifierConfig, DataPaths, ObservabilityConfig, PricingConfig, ServerConfig,
    Settings,
};
pub use training::load_training_data;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Read a YAML file into `T`, mapping IO and parse failures
pub(crate) fn read_yaml<T, P>(path: P) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<std::path::Path>,
{
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;

    serde_yaml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
}
