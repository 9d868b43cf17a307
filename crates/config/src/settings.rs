//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Knowledge base and training data locations
    #[serde(default)]
    pub data: DataPaths,

    /// Intent classifier configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Simulated pricing
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_classifier()?;
        self.validate_pricing()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.server.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_sessions".to_string(),
                message: "At least one session must be allowed".to_string(),
            });
        }

        Ok(())
    }

    fn validate_classifier(&self) -> Result<(), ConfigError> {
        let classifier = &self.classifier;

        if !(0.0..=1.0).contains(&classifier.confidence_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "classifier.confidence_threshold".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    classifier.confidence_threshold
                ),
            });
        }

        if classifier.max_features == 0 {
            return Err(ConfigError::InvalidValue {
                field: "classifier.max_features".to_string(),
                message: "Must be positive".to_string(),
            });
        }

        if classifier.max_iter == 0 {
            return Err(ConfigError::InvalidValue {
                field: "classifier.max_iter".to_string(),
                message: "Must be positive".to_string(),
            });
        }

        if classifier.learning_rate <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "classifier.learning_rate".to_string(),
                message: format!("Must be positive, got {}", classifier.learning_rate),
            });
        }

        if classifier.l2 < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "classifier.l2".to_string(),
                message: format!("Cannot be negative, got {}", classifier.l2),
            });
        }

        if classifier.max_training_rows == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "classifier.max_training_rows".to_string(),
                message: "Must be positive when set".to_string(),
            });
        }

        Ok(())
    }

    fn validate_pricing(&self) -> Result<(), ConfigError> {
        let pricing = &self.pricing;

        if pricing.surge_min <= 0.0 || pricing.surge_min > pricing.surge_max {
            return Err(ConfigError::InvalidValue {
                field: "pricing.surge_min".to_string(),
                message: format!(
                    "Surge range [{}, {}] is empty or non-positive",
                    pricing.surge_min, pricing.surge_max
                ),
            });
        }

        if pricing.fallback_price < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "pricing.fallback_price".to_string(),
                message: "Cannot be negative".to_string(),
            });
        }

        if pricing.default_room_code.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "pricing.default_room_code".to_string(),
            ));
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum concurrent chat sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Idle time after which a session is dropped
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins (empty = any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_max_sessions() -> usize {
    1000
}
fn default_session_timeout_secs() -> u64 {
    3600
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_sessions: default_max_sessions(),
            session_timeout_secs: default_session_timeout_secs(),
            cors_enabled: default_true(),
            cors_origins: Vec::new(),
        }
    }
}

/// Knowledge base and training data file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    #[serde(default = "default_hotel_info_path")]
    pub hotel_info: PathBuf,

    #[serde(default = "default_room_types_path")]
    pub room_types: PathBuf,

    #[serde(default = "default_amenity_faq_path")]
    pub amenity_faq: PathBuf,

    #[serde(default = "default_response_templates_path")]
    pub response_templates: PathBuf,

    #[serde(default = "default_training_data_path")]
    pub training_data: PathBuf,
}

fn default_hotel_info_path() -> PathBuf {
    PathBuf::from("data/hotel_info.yaml")
}
fn default_room_types_path() -> PathBuf {
    PathBuf::from("data/room_types.yaml")
}
fn default_amenity_faq_path() -> PathBuf {
    PathBuf::from("data/amenity_faq.yaml")
}
fn default_response_templates_path() -> PathBuf {
    PathBuf::from("data/response_templates.yaml")
}
fn default_training_data_path() -> PathBuf {
    PathBuf::from("data/training_data.yaml")
}

impl DataPaths {
    /// All data files under one directory, using the default file names
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            hotel_info: dir.join("hotel_info.yaml"),
            room_types: dir.join("room_types.yaml"),
            amenity_faq: dir.join("amenity_faq.yaml"),
            response_templates: dir.join("response_templates.yaml"),
            training_data: dir.join("training_data.yaml"),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            hotel_info: default_hotel_info_path(),
            room_types: default_room_types_path(),
            amenity_faq: default_amenity_faq_path(),
            response_templates: default_response_templates_path(),
            training_data: default_training_data_path(),
        }
    }
}

/// Intent classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum statistical confidence trusted without keyword fallback
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Consult the keyword matcher when the model is unsure
    #[serde(default = "default_true")]
    pub use_keyword_fallback: bool,

    /// Retrain from `data.training_data` at startup and overwrite
    /// `model_path`; when false, only load the persisted model
    #[serde(default = "default_true")]
    pub auto_train: bool,

    /// Persisted model artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Randomly down-sample the training set to this many rows
    #[serde(default)]
    pub max_training_rows: Option<usize>,

    /// TF-IDF vocabulary cap
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Gradient descent iterations
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,

    /// L2 penalty strength (1/C); divided by the sample count
    #[serde(default = "default_l2")]
    pub l2: f32,
}

fn default_confidence_threshold() -> f32 {
    0.25
}
fn default_model_path() -> PathBuf {
    PathBuf::from("artifacts/intent_classifier.json")
}
fn default_max_features() -> usize {
    6000
}
fn default_max_iter() -> usize {
    1000
}
fn default_learning_rate() -> f32 {
    1.5
}
fn default_l2() -> f32 {
    1.0
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            use_keyword_fallback: default_true(),
            auto_train: default_true(),
            model_path: default_model_path(),
            max_training_rows: None,
            max_features: default_max_features(),
            max_iter: default_max_iter(),
            learning_rate: default_learning_rate(),
            l2: default_l2(),
        }
    }
}

/// Simulated pricing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Lower bound of the random demand multiplier
    #[serde(default = "default_surge_min")]
    pub surge_min: f64,

    /// Upper bound of the random demand multiplier
    #[serde(default = "default_surge_max")]
    pub surge_max: f64,

    /// Room quoted for a price inquiry that names no room
    #[serde(default = "default_room_code")]
    pub default_room_code: String,

    /// Quote used when the default room is missing from the catalog
    #[serde(default = "default_fallback_price")]
    pub fallback_price: f64,
}

fn default_surge_min() -> f64 {
    0.95
}
fn default_surge_max() -> f64 {
    1.15
}
fn default_room_code() -> String {
    "STD".to_string()
}
fn default_fallback_price() -> f64 {
    150.0
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            surge_min: default_surge_min(),
            surge_max: default_surge_max(),
            default_room_code: default_room_code(),
            fallback_price: default_fallback_price(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from `config/` and the environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Load settings from a specific config directory
pub fn load_settings_from<P: AsRef<Path>>(
    config_dir: P,
    env: Option<&str>,
) -> Result<Settings, ConfigError> {
    let config_dir = config_dir.as_ref();
    let mut builder = Config::builder();

    // Load default config
    let default_path = config_dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        let env_path = config_dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("HOTEL_CONCIERGE")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.classifier.confidence_threshold, 0.25);
        assert_eq!(settings.classifier.max_features, 6000);
        assert_eq!(settings.pricing.default_room_code, "STD");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_classifier_validation() {
        let mut settings = Settings::default();

        settings.classifier.confidence_threshold = 1.5;
        assert!(settings.validate_classifier().is_err());
        settings.classifier.confidence_threshold = 0.25;

        settings.classifier.max_features = 0;
        assert!(settings.validate_classifier().is_err());
        settings.classifier.max_features = 6000;

        settings.classifier.learning_rate = 0.0;
        assert!(settings.validate_classifier().is_err());
        settings.classifier.learning_rate = 1.0;

        assert!(settings.validate_classifier().is_ok());
    }

    #[test]
    fn test_pricing_validation() {
        let mut settings = Settings::default();

        settings.pricing.surge_min = 1.2;
        assert!(settings.validate_pricing().is_err());

        settings.pricing.surge_min = 0.95;
        settings.pricing.default_room_code = " ".to_string();
        assert!(settings.validate_pricing().is_err());
    }

    #[test]
    fn test_server_validation() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate_server().is_err());
        settings.server.port = 8080;

        settings.server.max_sessions = 0;
        assert!(settings.validate_server().is_err());
    }

    #[test]
    fn test_load_settings_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 9000\nclassifier:\n  confidence_threshold: 0.4\n  max_training_rows: 200\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.classifier.confidence_threshold, 0.4);
        assert_eq!(settings.classifier.max_training_rows, Some(200));
        assert_eq!(settings.pricing.surge_max, 1.15);
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.yaml"), "server:\n  port: 9000\n").unwrap();
        std::fs::write(dir.path().join("staging.yaml"), "server:\n  port: 9100\n").unwrap();

        let settings = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.server.port, 9100);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "pricing:\n  surge_min: 1.5\n  surge_max: 1.1\n",
        )
        .unwrap();

        assert!(load_settings_from(dir.path(), None).is_err());
    }

    #[test]
    fn test_data_paths_in_dir() {
        let paths = DataPaths::in_dir("/srv/hotel");
        assert_eq!(paths.room_types, PathBuf::from("/srv/hotel/room_types.yaml"));
        assert_eq!(
            paths.training_data,
            PathBuf::from("/srv/hotel/training_data.yaml")
        );
    }
}
