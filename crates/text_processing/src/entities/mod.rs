//! Hotel entity extraction
//!
//! Deterministic slot extraction from a single utterance:
//! - Stay dates (first two ISO `YYYY-MM-DD` dates as check-in / check-out)
//! - Nights, adults, children and total guest counts
//! - Reservation identifiers (8-character lowercase hex)
//! - Time of day (`h[:mm] am|pm`)
//! - Amenities named in the FAQ
//! - Room references via a synonym table built from the catalog
//!
//! # Example
//!
//! ```ignore
//! use hotel_concierge_text_processing::EntityExtractor;
//!
//! let extractor = EntityExtractor::new(&hotel_info);
//! let entities = extractor.extract("a deluxe room for 2 adults from 2025-12-10");
//!
//! assert_eq!(entities.room_code.as_deref(), Some("DLX"));
//! assert_eq!(entities.adults, Some(2));
//! ```

use hotel_concierge_core::{Entities, HotelInfo};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap());
static NIGHTS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s+nights?").unwrap());
static ADULT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s+(?:adult|adults)").unwrap());
static CHILD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s+(?:child|children|kid|kids)").unwrap());
static TOTAL_GUEST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s+(?:guest|guests|people)").unwrap());
static RESERVATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-f0-9]{8}\b").unwrap());
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})(?::(\d{2}))?\s*(am|pm)").unwrap());

/// Hand-written room phrasings, mapped to catalog codes
const MANUAL_ROOM_SYNONYMS: &[(&str, &str)] = &[
    ("standard room", "STD"),
    ("standard", "STD"),
    ("queen room", "STD"),
    ("queen", "STD"),
    ("deluxe room", "DLX"),
    ("deluxe", "DLX"),
    ("king room", "DLX"),
    ("king", "DLX"),
    ("twin room", "DLX"),
    ("twin", "DLX"),
    ("family suite", "FAM"),
    ("family room", "FAM"),
    ("family", "FAM"),
    ("ocean suite", "STE"),
    ("ocean view suite", "STE"),
    ("suite", "STE"),
    ("ocean", "STE"),
];

/// One entry of the room synonym table
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSynonym {
    /// Lower-cased phrase searched for in the utterance
    pub label: String,
    pub room_code: String,
    pub room_type: String,
}

/// Rule-based extractor bound to one knowledge base
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    /// Longest label first
    room_synonyms: Vec<RoomSynonym>,
    /// (lower-cased key, original key) in FAQ order
    amenity_keywords: Vec<(String, String)>,
}

impl EntityExtractor {
    pub fn new(hotel_info: &HotelInfo) -> Self {
        let amenity_keywords = hotel_info
            .amenity_faq
            .keys()
            .map(|key| (key.to_lowercase(), key.clone()))
            .collect();

        Self {
            room_synonyms: build_room_synonyms(hotel_info),
            amenity_keywords,
        }
    }

    /// Room synonyms in match order
    pub fn room_synonyms(&self) -> &[RoomSynonym] {
        &self.room_synonyms
    }

    /// Extract all slots present in `utterance`
    pub fn extract(&self, utterance: &str) -> Entities {
        let text = utterance.to_lowercase();
        let mut entities = Entities::new(utterance);

        let mut dates = DATE_PATTERN.find_iter(utterance).map(|m| m.as_str().to_string());
        entities.check_in = dates.next();
        entities.check_out = dates.next();

        entities.nights = capture_count(&NIGHTS_PATTERN, &text);
        entities.adults = capture_count(&ADULT_PATTERN, &text);
        entities.children = capture_count(&CHILD_PATTERN, &text);
        entities.guests_total = capture_count(&TOTAL_GUEST_PATTERN, &text);

        entities.reservation_id = RESERVATION_PATTERN
            .find(&text)
            .map(|m| m.as_str().to_string());

        entities.time_request = TIME_PATTERN.captures(&text).and_then(|caps| {
            let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
            let minute: u32 = caps
                .get(2)
                .map(|m| m.as_str().parse().unwrap_or(0))
                .unwrap_or(0);
            let meridiem = caps.get(3)?.as_str();
            Some(format!("{:02}:{:02} {}", hour, minute, meridiem))
        });

        entities.amenity = self
            .amenity_keywords
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, amenity)| amenity.clone());

        if let Some(room) = self
            .room_synonyms
            .iter()
            .find(|synonym| text.contains(synonym.label.as_str()))
        {
            entities.room_code = Some(room.room_code.clone());
            entities.room_type = Some(room.room_type.clone());
        }

        entities
    }
}

fn capture_count(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Build the room synonym table
///
/// Manual phrasings come first, then each catalog room contributes its code,
/// name, short name and bed description. A label seen again keeps its
/// original slot but takes the newer room. The table is finally ordered by
/// label length, longest first, so "ocean suite" wins over "ocean".
fn build_room_synonyms(hotel_info: &HotelInfo) -> Vec<RoomSynonym> {
    let mut synonyms: Vec<RoomSynonym> = Vec::new();

    let mut insert = |label: String, room_code: &str, room_type: &str| {
        match synonyms.iter_mut().find(|s| s.label == label) {
            Some(existing) => {
                existing.room_code = room_code.to_string();
                existing.room_type = room_type.to_string();
            }
            None => synonyms.push(RoomSynonym {
                label,
                room_code: room_code.to_string(),
                room_type: room_type.to_string(),
            }),
        }
    };

    for &(label, code) in MANUAL_ROOM_SYNONYMS {
        let room_type = hotel_info.room_name(code).unwrap_or(code);
        insert(label.to_string(), code, room_type);
    }

    for room in &hotel_info.room_types {
        if room.code.is_empty() {
            continue;
        }
        let mut labels = vec![
            room.code.to_lowercase(),
            room.name.to_lowercase(),
            room.short_name(),
        ];
        if !room.beds.is_empty() {
            labels.push(room.beds.to_lowercase());
        }
        for label in labels {
            let label = label.trim().to_string();
            if label.chars().count() < 2 {
                continue;
            }
            insert(label, &room.code, &room.name);
        }
    }

    synonyms.sort_by(|a, b| b.label.chars().count().cmp(&a.label.chars().count()));
    synonyms
}
