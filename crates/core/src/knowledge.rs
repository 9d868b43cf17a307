//! Hotel knowledge base
//!
//! Static catalog loaded once at startup and shared read-only between
//! sessions: hotel metadata, the room catalog, amenity FAQ answers and the
//! response templates keyed by intent.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A bookable room type from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    /// Short room code (e.g., "DLX")
    pub code: String,
    /// Display name (e.g., "Deluxe King Room")
    pub name: String,
    /// Bed description (e.g., "1 King")
    #[serde(default)]
    pub beds: String,
    /// Nightly base rate Sunday - Thursday
    pub base_price_weekday: f64,
    /// Nightly base rate Friday - Saturday
    pub base_price_weekend: f64,
    /// Available views
    #[serde(default, deserialize_with = "list_or_csv")]
    pub view_options: Vec<String>,
    /// In-room amenities
    #[serde(default, deserialize_with = "list_or_csv")]
    pub amenities: Vec<String>,
}

impl RoomType {
    /// Name with the generic "Room"/"Suite" words removed ("Deluxe King Room" -> "deluxe king")
    pub fn short_name(&self) -> String {
        self.name
            .replace("Room", "")
            .replace("Suite", "")
            .trim()
            .to_lowercase()
    }
}

/// Accept either a YAML sequence or a comma-separated string
fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrCsv {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match ListOrCsv::deserialize(deserializer)? {
        ListOrCsv::List(items) => items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        ListOrCsv::Csv(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    })
}

/// Immutable hotel knowledge base
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelInfo {
    /// Hotel metadata (name, address, phone, email)
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Room catalog in display order
    #[serde(default)]
    pub room_types: Vec<RoomType>,
    /// Amenity name -> answer text
    #[serde(default)]
    pub amenity_faq: BTreeMap<String, String>,
    /// Intent name -> response template with `{placeholder}` fields
    #[serde(default)]
    pub responses: BTreeMap<String, String>,
}

impl HotelInfo {
    /// Look up a metadata value
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|s| s.as_str())
    }

    /// Hotel display name, if configured
    pub fn hotel_name(&self) -> Option<&str> {
        self.meta("name").filter(|name| !name.is_empty())
    }

    /// Find a room by its code
    pub fn room(&self, code: &str) -> Option<&RoomType> {
        self.room_types.iter().find(|room| room.code == code)
    }

    /// Display name for a room code
    pub fn room_name(&self, code: &str) -> Option<&str> {
        self.room(code).map(|room| room.name.as_str())
    }

    /// Response template for an intent
    pub fn template(&self, intent: &str) -> Option<&str> {
        self.responses.get(intent).map(|s| s.as_str())
    }
}
