//! Conversation Context
//!
//! Per-session memory: the hotel identity (fixed at construction), the
//! booking slots remembered across turns, reservation status, message
//! history and learned preferences. One instance per session; nothing is
//! persisted.

use chrono::{DateTime, Utc};
use hotel_concierge_core::{Entities, HotelInfo, UNKNOWN_INTENT};
use serde::{Deserialize, Serialize};

/// Hotel name used when the knowledge base has none
pub const DEFAULT_HOTEL_NAME: &str = "our hotel";

/// Author of a history message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logged message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: MessageRole,
    pub content: String,
    /// Intent of the turn, `unknown` when none was given
    pub intent: String,
    pub timestamp: DateTime<Utc>,
}

/// Hotel identity; survives every reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelIdentity {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl HotelIdentity {
    pub fn from_hotel_info(info: &HotelInfo) -> Self {
        let meta = |key: &str| info.meta(key).unwrap_or_default().to_string();
        Self {
            name: info.hotel_name().unwrap_or(DEFAULT_HOTEL_NAME).to_string(),
            address: meta("address"),
            phone: meta("phone"),
            email: meta("email"),
        }
    }
}

/// Booking slots remembered across turns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSlots {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub room_type: Option<String>,
    pub room_code: Option<String>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub guests_total: Option<u32>,
    pub reservation_id: Option<String>,
    pub confirmed: bool,
}

/// Preferences learned during the conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub preferred_room_type: Option<String>,
    pub special_requests: Vec<String>,
}

/// Session memory
#[derive(Debug, Clone, Serialize)]
pub struct ConversationContext {
    hotel: HotelIdentity,
    booking: BookingSlots,
    history: Vec<HistoryMessage>,
    last_intent: Option<String>,
    preferences: Preferences,
}

impl ConversationContext {
    pub fn new(hotel: HotelIdentity) -> Self {
        Self {
            hotel,
            booking: BookingSlots::default(),
            history: Vec::new(),
            last_intent: None,
            preferences: Preferences::default(),
        }
    }

    pub fn for_hotel(info: &HotelInfo) -> Self {
        Self::new(HotelIdentity::from_hotel_info(info))
    }

    pub fn hotel(&self) -> &HotelIdentity {
        &self.hotel
    }

    pub fn hotel_name(&self) -> &str {
        &self.hotel.name
    }

    pub fn booking(&self) -> &BookingSlots {
        &self.booking
    }

    pub fn history(&self) -> &[HistoryMessage] {
        &self.history
    }

    pub fn last_intent(&self) -> Option<&str> {
        self.last_intent.as_deref()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Remember every booking slot present in `entities`
    ///
    /// Absent slots never clear a remembered value.
    pub fn update_from_entities(&mut self, entities: &Entities) {
        fn keep<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if let Some(value) = value {
                *slot = Some(value.clone());
            }
        }

        let booking = &mut self.booking;
        keep(&mut booking.check_in, &entities.check_in);
        keep(&mut booking.check_out, &entities.check_out);
        keep(&mut booking.room_type, &entities.room_type);
        keep(&mut booking.room_code, &entities.room_code);
        keep(&mut booking.adults, &entities.adults);
        keep(&mut booking.children, &entities.children);
        keep(&mut booking.guests_total, &entities.guests_total);
        keep(&mut booking.reservation_id, &entities.reservation_id);
    }

    /// Append to the history; a given intent also becomes the last intent
    pub fn add_message(&mut self, role: MessageRole, content: impl Into<String>, intent: Option<&str>) {
        self.history.push(HistoryMessage {
            role,
            content: content.into(),
            intent: intent.unwrap_or(UNKNOWN_INTENT).to_string(),
            timestamp: Utc::now(),
        });
        if let Some(intent) = intent {
            self.last_intent = Some(intent.to_string());
        }
    }

    /// Mark the remembered reservation as confirmed
    ///
    /// Returns false when there is no reservation to confirm.
    pub fn confirm_reservation(&mut self) -> bool {
        if self.booking.reservation_id.is_some() {
            self.booking.confirmed = true;
        }
        self.booking.confirmed
    }

    pub fn set_preferred_room_type(&mut self, room_type: impl Into<String>) {
        self.preferences.preferred_room_type = Some(room_type.into());
    }

    pub fn add_special_request(&mut self, request: impl Into<String>) {
        let request = request.into();
        if !self.preferences.special_requests.contains(&request) {
            self.preferences.special_requests.push(request);
        }
    }

    /// Forget the booking; hotel identity and history stay
    pub fn clear_booking(&mut self) {
        self.booking = BookingSlots::default();
    }

    /// Forget the booking, the history and the last intent
    pub fn reset(&mut self) {
        self.clear_booking();
        self.history.clear();
        self.last_intent = None;
    }

    /// Whether any booking detail has been collected
    pub fn has_partial_booking(&self) -> bool {
        let b = &self.booking;
        b.check_in.is_some()
            || b.check_out.is_some()
            || b.room_type.is_some()
            || b.room_code.is_some()
            || b.adults.is_some()
            || b.children.is_some()
            || b.guests_total.is_some()
            || b.reservation_id.is_some()
    }

    /// One-line summary: hotel, dates, room, guests, reservation
    pub fn context_summary(&self) -> String {
        let b = &self.booking;
        let mut parts = vec![format!("Hotel: {}", self.hotel.name)];

        match (&b.check_in, &b.check_out) {
            (Some(check_in), Some(check_out)) => {
                parts.push(format!("Dates: {} to {}", check_in, check_out))
            }
            (Some(check_in), None) => parts.push(format!("Check-in: {}", check_in)),
            _ => {}
        }

        if let Some(room_type) = &b.room_type {
            parts.push(format!("Room: {}", room_type));
        }

        let adults = b.adults.filter(|n| *n > 0);
        let children = b.children.filter(|n| *n > 0);
        if let Some(guests) = adults.or(b.guests_total.filter(|n| *n > 0)) {
            let mut guest_text = format!("{} guest{}", guests, if guests != 1 { "s" } else { "" });
            if let Some(children) = children {
                guest_text.push_str(&format!(
                    " ({} adults, {} children)",
                    adults.unwrap_or(0),
                    children
                ));
            }
            parts.push(format!("Guests: {}", guest_text));
        }

        if let Some(reservation_id) = &b.reservation_id {
            let status = if b.confirmed { "Confirmed" } else { "Pending" };
            parts.push(format!("Reservation: {} ({})", reservation_id, status));
        }

        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ConversationContext {
        ConversationContext::new(HotelIdentity {
            name: "Sunset Bay Hotel".to_string(),
            address: "123 Seaside Ave".to_string(),
            phone: "+1-415-555-0130".to_string(),
            email: "contact@sunsetbayhotel.example".to_string(),
        })
    }

    #[test]
    fn test_update_only_overwrites_present_slots() {
        let mut ctx = context();
        let mut first = Entities::new("deluxe for 2 adults");
        first.room_type = Some("Deluxe King Room".to_string());
        first.adults = Some(2);
        ctx.update_from_entities(&first);

        let mut second = Entities::new("from 2025-12-10");
        second.check_in = Some("2025-12-10".to_string());
        ctx.update_from_entities(&second);

        assert_eq!(ctx.booking().adults, Some(2));
        assert_eq!(ctx.booking().room_type.as_deref(), Some("Deluxe King Room"));
        assert_eq!(ctx.booking().check_in.as_deref(), Some("2025-12-10"));

        let mut third = Entities::new("make it 3 adults");
        third.adults = Some(3);
        ctx.update_from_entities(&third);
        assert_eq!(ctx.booking().adults, Some(3));
    }

    #[test]
    fn test_summary_format() {
        let mut ctx = context();
        assert_eq!(ctx.context_summary(), "Hotel: Sunset Bay Hotel");

        let mut entities = Entities::new("");
        entities.check_in = Some("2025-12-10".to_string());
        entities.check_out = Some("2025-12-12".to_string());
        entities.room_type = Some("Deluxe King Room".to_string());
        entities.adults = Some(2);
        entities.children = Some(1);
        entities.reservation_id = Some("1a2b3c4d".to_string());
        ctx.update_from_entities(&entities);

        assert_eq!(
            ctx.context_summary(),
            "Hotel: Sunset Bay Hotel | Dates: 2025-12-10 to 2025-12-12 | Room: Deluxe King Room \
             | Guests: 2 guests (2 adults, 1 children) | Reservation: 1a2b3c4d (Pending)"
        );

        assert!(ctx.confirm_reservation());
        assert!(ctx.context_summary().ends_with("(Confirmed)"));
    }

    #[test]
    fn test_summary_check_in_only_and_single_guest() {
        let mut ctx = context();
        let mut entities = Entities::new("");
        entities.check_in = Some("2025-12-10".to_string());
        entities.guests_total = Some(1);
        ctx.update_from_entities(&entities);
        assert_eq!(
            ctx.context_summary(),
            "Hotel: Sunset Bay Hotel | Check-in: 2025-12-10 | Guests: 1 guest"
        );
    }

    #[test]
    fn test_add_message_tracks_last_intent() {
        let mut ctx = context();
        ctx.add_message(MessageRole::User, "hello", None);
        assert_eq!(ctx.history()[0].intent, "unknown");
        assert_eq!(ctx.last_intent(), None);

        ctx.add_message(MessageRole::Assistant, "Welcome!", Some("greet"));
        assert_eq!(ctx.last_intent(), Some("greet"));
        assert_eq!(ctx.history().len(), 2);
    }

    #[test]
    fn test_clear_booking_keeps_identity_and_history() {
        let mut ctx = context();
        let mut entities = Entities::new("");
        entities.adults = Some(2);
        ctx.update_from_entities(&entities);
        ctx.add_message(MessageRole::User, "2 adults", None);
        assert!(ctx.has_partial_booking());

        ctx.clear_booking();
        assert!(!ctx.has_partial_booking());
        assert_eq!(ctx.history().len(), 1);
        assert_eq!(ctx.hotel_name(), "Sunset Bay Hotel");

        ctx.reset();
        assert!(ctx.history().is_empty());
        assert_eq!(ctx.hotel_name(), "Sunset Bay Hotel");
    }

    #[test]
    fn test_confirm_without_reservation() {
        let mut ctx = context();
        assert!(!ctx.confirm_reservation());
        assert!(!ctx.booking().confirmed);
    }

    #[test]
    fn test_identity_from_hotel_info() {
        let info = HotelInfo::default();
        let ctx = ConversationContext::for_hotel(&info);
        assert_eq!(ctx.hotel_name(), DEFAULT_HOTEL_NAME);
        assert!(ctx.hotel().phone.is_empty());
    }
}
