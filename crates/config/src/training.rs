//! Training data loader

use hotel_concierge_core::TrainingRow;
use std::path::Path;

use crate::{read_yaml, ConfigError};

/// Load labeled utterances
///
/// Rows with a blank utterance are dropped. An empty file is an error since
/// the classifier cannot be fitted from it.
pub fn load_training_data<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingRow>, ConfigError> {
    let rows: Vec<TrainingRow> = read_yaml(path.as_ref())?;
    let total = rows.len();

    let rows: Vec<TrainingRow> = rows
        .into_iter()
        .filter(|row| !row.utterance.trim().is_empty())
        .collect();

    if rows.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "training_data".to_string(),
            message: format!("{} contains no utterances", path.as_ref().display()),
        });
    }

    tracing::info!(
        rows = rows.len(),
        dropped = total - rows.len(),
        "Loaded training data"
    );

    Ok(rows)
}
