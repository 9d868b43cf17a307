//! Knowledge base loaders
//!
//! Each table lives in its own YAML file:
//! - `hotel_info.yaml` - name/address/phone/email mapping
//! - `room_types.yaml` - ordered room catalog
//! - `amenity_faq.yaml` - amenity -> answer
//! - `response_templates.yaml` - intent -> template

use hotel_concierge_core::{HotelInfo, RoomType, UNKNOWN_INTENT};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::{read_yaml, ConfigError, DataPaths};

/// Load hotel metadata
pub fn load_hotel_metadata<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>, ConfigError> {
    read_yaml(path)
}

/// Load the room catalog, rejecting duplicate codes
pub fn load_room_types<P: AsRef<Path>>(path: P) -> Result<Vec<RoomType>, ConfigError> {
    let rooms: Vec<RoomType> = read_yaml(path)?;

    let mut seen = HashSet::new();
    for room in &rooms {
        if room.code.trim().is_empty() {
            return Err(ConfigError::MissingField("room_types[].code".to_string()));
        }
        if !seen.insert(room.code.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "room_types".to_string(),
                message: format!("Duplicate room code {}", room.code),
            });
        }
    }

    Ok(rooms)
}

/// Load amenity FAQ answers
pub fn load_amenity_faq<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>, ConfigError> {
    read_yaml(path)
}

/// Load response templates keyed by intent
pub fn load_response_templates<P: AsRef<Path>>(
    path: P,
) -> Result<BTreeMap<String, String>, ConfigError> {
    let templates: BTreeMap<String, String> = read_yaml(path)?;
    if !templates.contains_key(UNKNOWN_INTENT) {
        tracing::warn!("No '{}' response template; unmatched intents will get the default apology", UNKNOWN_INTENT);
    }
    Ok(templates)
}

/// Assemble a [`HotelInfo`] from its four tables
pub fn load_hotel_info(paths: &DataPaths) -> Result<HotelInfo, ConfigError> {
    let info = HotelInfo {
        metadata: load_hotel_metadata(&paths.hotel_info)?,
        room_types: load_room_types(&paths.room_types)?,
        amenity_faq: load_amenity_faq(&paths.amenity_faq)?,
        responses: load_response_templates(&paths.response_templates)?,
    };

    tracing::info!(
        hotel = info.hotel_name().unwrap_or("<unnamed>"),
        rooms = info.room_types.len(),
        amenities = info.amenity_faq.len(),
        templates = info.responses.len(),
        "Loaded knowledge base"
    );

    Ok(info)
}

/// Load the knowledge base from a directory using the default file names
pub fn load_knowledge_base<P: AsRef<Path>>(dir: P) -> Result<HotelInfo, ConfigError> {
    load_hotel_info(&DataPaths::in_dir(dir))
}
