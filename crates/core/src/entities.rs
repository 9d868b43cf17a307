//! Slots extracted from a single user utterance

use serde::{Deserialize, Serialize};

/// Typed slot values extracted from one turn
///
/// Every slot is optional; absence means "not mentioned this turn", never
/// "cleared". The raw utterance is always retained for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    pub raw_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nights: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adults: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
    /// Normalized `HH:MM am|pm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
}

impl Entities {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Default::default()
        }
    }

    /// Names of the slots that carry a value, in declaration order
    pub fn filled_slots(&self) -> Vec<&'static str> {
        let mut filled = Vec::new();
        let mut mark = |present: bool, name: &'static str| {
            if present {
                filled.push(name);
            }
        };
        mark(self.check_in.is_some(), "check_in");
        mark(self.check_out.is_some(), "check_out");
        mark(self.nights.is_some(), "nights");
        mark(self.adults.is_some(), "adults");
        mark(self.children.is_some(), "children");
        mark(self.guests_total.is_some(), "guests_total");
        mark(self.reservation_id.is_some(), "reservation_id");
        mark(self.time_request.is_some(), "time_request");
        mark(self.amenity.is_some(), "amenity");
        mark(self.room_code.is_some(), "room_code");
        mark(self.room_type.is_some(), "room_type");
        filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled_slots().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_slots_are_not_serialized() {
        let mut entities = Entities::new("2 adults please");
        entities.adults = Some(2);

        let json = serde_json::to_value(&entities).unwrap();
        assert_eq!(json["adults"], 2);
        assert_eq!(json["raw_text"], "2 adults please");
        assert!(json.get("check_in").is_none());
    }

    #[test]
    fn test_filled_slots() {
        let mut entities = Entities::new("");
        assert!(entities.is_empty());
        entities.check_in = Some("2025-12-10".into());
        entities.room_code = Some("DLX".into());
        assert_eq!(entities.filled_slots(), vec!["check_in", "room_code"]);
    }
}
