//! Dialogue Manager
//!
//! Turns an intent plus this turn's entities into a reply. The context is
//! updated first, then the intent's template is filled from (in order) the
//! current entities, the remembered context and literal defaults.

pub mod template;

pub use template::{render, TemplateValues};

use chrono::Local;
use hotel_concierge_core::{Entities, HotelInfo, UNKNOWN_INTENT};
use std::sync::Arc;

use crate::context::ConversationContext;
use crate::pricing::{PriceEstimator, DATE_FORMAT};

/// Reply used when neither the intent nor `unknown` has a usable template
pub const DEFAULT_RESPONSE: &str = "I'm not sure I understood that. Could you rephrase?";

/// Template-driven reply generator over a shared knowledge base
#[derive(Debug, Clone)]
pub struct DialogueManager {
    hotel: Arc<HotelInfo>,
    pricing: PriceEstimator,
}

impl DialogueManager {
    pub fn new(hotel: Arc<HotelInfo>, pricing: PriceEstimator) -> Self {
        Self { hotel, pricing }
    }

    pub fn hotel(&self) -> &HotelInfo {
        &self.hotel
    }

    pub fn pricing(&self) -> &PriceEstimator {
        &self.pricing
    }

    /// Remember the entities, apply intent side effects and render the reply
    pub fn respond(&self, ctx: &mut ConversationContext, intent: &str, entities: &Entities) -> String {
        ctx.update_from_entities(entities);
        self.apply_intent(ctx, intent, entities);

        let template = self
            .hotel
            .template(intent)
            .or_else(|| self.hotel.template(UNKNOWN_INTENT));
        let Some(template) = template else {
            tracing::debug!(intent, "No response template");
            return DEFAULT_RESPONSE.to_string();
        };

        let values = self.template_values(ctx, intent, entities);
        match render(template, &values) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(intent, error = %e, "Template could not be rendered");
                DEFAULT_RESPONSE.to_string()
            }
        }
    }

    fn apply_intent(&self, ctx: &mut ConversationContext, intent: &str, entities: &Entities) {
        match intent {
            "confirm" => {
                if ctx.confirm_reservation() {
                    tracing::debug!(
                        reservation_id = ?ctx.booking().reservation_id,
                        "Reservation confirmed"
                    );
                }
            }
            "make_reservation" => {
                if let Some(room_type) = ctx.booking().room_type.clone() {
                    ctx.set_preferred_room_type(room_type);
                }
            }
            "request_late_checkout" => {
                ctx.add_special_request(special_request("late checkout", entities));
            }
            "request_early_checkin" => {
                ctx.add_special_request(special_request("early check-in", entities));
            }
            _ => {}
        }
    }

    /// Placeholder values for one reply
    pub fn template_values(
        &self,
        ctx: &ConversationContext,
        intent: &str,
        entities: &Entities,
    ) -> TemplateValues {
        let booking = ctx.booking();

        let room_type = entities
            .room_type
            .clone()
            .or_else(|| {
                entities
                    .room_code
                    .as_deref()
                    .and_then(|code| self.hotel.room_name(code))
                    .map(str::to_string)
            })
            .or_else(|| booking.room_type.clone())
            .unwrap_or_else(|| "room".to_string());
        let room_code = entities.room_code.as_deref().or(booking.room_code.as_deref());

        let adults = entities.adults.or(booking.adults).filter(|n| *n > 0);
        let children = entities.children.or(booking.children).filter(|n| *n > 0);
        let check_in = entities.check_in.as_deref().or(booking.check_in.as_deref());
        let check_out = entities.check_out.as_deref().or(booking.check_out.as_deref());
        let guests_total = entities
            .guests_total
            .or(booking.guests_total)
            .filter(|n| *n > 0)
            .or(adults)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "your group".to_string());

        let mut price = room_code.and_then(|code| self.pricing.estimate(&self.hotel, code, check_in));
        if intent == "inquire_price" && price.is_none() {
            let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
            price = Some(
                self.pricing
                    .estimate(&self.hotel, self.pricing.default_room_code(), Some(&today))
                    .unwrap_or(self.pricing.fallback_price()),
            );
        }

        let amenity_answer = entities
            .amenity
            .as_deref()
            .and_then(|amenity| self.hotel.amenity_faq.get(amenity))
            .cloned()
            .unwrap_or_default();

        let hotel = ctx.hotel();
        let mut values = TemplateValues::new();
        values.insert("hotel_name", hotel.name.clone());
        values.insert("hotel_phone", hotel.phone.clone());
        values.insert("hotel_address", hotel.address.clone());
        values.insert("hotel_email", hotel.email.clone());
        values.insert("room_type", room_type);
        values.insert("check_in", check_in.unwrap_or("your arrival date").to_string());
        values.insert("check_out", check_out.unwrap_or("your departure date").to_string());
        values.insert(
            "nights",
            entities.nights.map(|n| n.to_string()).unwrap_or_default(),
        );
        values.insert(
            "adults",
            adults.map(|n| n.to_string()).unwrap_or_else(|| guests_total.clone()),
        );
        values.insert("children", children.unwrap_or(0).to_string());
        values.insert(
            "children_txt",
            children
                .map(|c| format!("and {} children", c))
                .unwrap_or_default(),
        );
        values.insert("guests_total", guests_total);
        values.insert(
            "amenity",
            entities.amenity.clone().unwrap_or_else(|| "the amenity".to_string()),
        );
        values.insert("amenity_answer", amenity_answer);
        values.insert(
            "price",
            price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "our nightly rate".to_string()),
        );
        values.insert(
            "reservation_id",
            entities
                .reservation_id
                .clone()
                .or_else(|| booking.reservation_id.clone())
                .unwrap_or_else(|| "your reservation".to_string()),
        );
        values
    }
}

fn special_request(kind: &str, entities: &Entities) -> String {
    match &entities.time_request {
        Some(time) => format!("{} at {}", kind, time),
        None => kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HotelIdentity;
    use hotel_concierge_config::PricingConfig;
    use hotel_concierge_core::RoomType;

    fn hotel() -> HotelInfo {
        let mut info = HotelInfo::default();
        info.metadata.insert("name".to_string(), "Sunset Bay Hotel".to_string());
        info.room_types = vec![
            RoomType {
                code: "STD".to_string(),
                name: "Standard Queen Room".to_string(),
                beds: "1 Queen".to_string(),
                base_price_weekday: 129.0,
                base_price_weekend: 159.0,
                view_options: vec![],
                amenities: vec![],
            },
            RoomType {
                code: "DLX".to_string(),
                name: "Deluxe King Room".to_string(),
                beds: "1 King".to_string(),
                base_price_weekday: 189.0,
                base_price_weekend: 229.0,
                view_options: vec![],
                amenities: vec![],
            },
        ];
        info.amenity_faq
            .insert("parking".to_string(), "Self-parking is $25 per night.".to_string());
        let responses = [
            ("greet", "Welcome to {hotel_name}!"),
            ("unknown", "Sorry, I didn't get that."),
            ("make_reservation", "Booking a {room_type} for {adults} adults {children_txt}."),
            ("inquire_price", "The {room_type} is ${price} per night."),
            ("inquire_parking", "{amenity_answer}"),
            ("cancel_reservation", "Cancelling {reservation_id} for {guest_name}."),
        ];
        for (intent, template) in responses {
            info.responses.insert(intent.to_string(), template.to_string());
        }
        info
    }

    fn manager(info: HotelInfo) -> DialogueManager {
        let fixed = PricingConfig {
            surge_min: 1.0,
            surge_max: 1.0,
            ..Default::default()
        };
        DialogueManager::new(Arc::new(info), PriceEstimator::from_config(&fixed))
    }

    fn context(info: &HotelInfo) -> ConversationContext {
        ConversationContext::new(HotelIdentity::from_hotel_info(info))
    }

    #[test]
    fn test_greeting_uses_hotel_name() {
        let info = hotel();
        let mut ctx = context(&info);
        let reply = manager(info).respond(&mut ctx, "greet", &Entities::new("hi"));
        assert_eq!(reply, "Welcome to Sunset Bay Hotel!");
    }

    #[test]
    fn test_unmapped_intent_uses_unknown_template() {
        let info = hotel();
        let mut ctx = context(&info);
        let reply = manager(info).respond(&mut ctx, "inquire_spa", &Entities::new("spa?"));
        assert_eq!(reply, "Sorry, I didn't get that.");
    }

    #[test]
    fn test_no_templates_gives_default_response() {
        let info = HotelInfo::default();
        let mut ctx = context(&info);
        let reply = manager(info).respond(&mut ctx, "greet", &Entities::new("hi"));
        assert_eq!(reply, DEFAULT_RESPONSE);
    }

    #[test]
    fn test_missing_placeholder_gives_default_response() {
        let info = hotel();
        let mut ctx = context(&info);
        let reply = manager(info).respond(&mut ctx, "cancel_reservation", &Entities::new("cancel"));
        assert_eq!(reply, DEFAULT_RESPONSE);
    }

    #[test]
    fn test_room_and_guests_come_from_context() {
        let info = hotel();
        let dm = manager(info.clone());
        let mut ctx = context(&info);

        let mut first = Entities::new("deluxe for 2 adults and 1 child");
        first.room_code = Some("DLX".to_string());
        first.room_type = Some("Deluxe King Room".to_string());
        first.adults = Some(2);
        first.children = Some(1);
        let reply = dm.respond(&mut ctx, "make_reservation", &first);
        assert_eq!(reply, "Booking a Deluxe King Room for 2 adults and 1 children.");
        assert_eq!(
            ctx.preferences().preferred_room_type.as_deref(),
            Some("Deluxe King Room")
        );

        let reply = dm.respond(&mut ctx, "inquire_price", &Entities::new("how much?"));
        assert_eq!(reply, "The Deluxe King Room is $189.00 per night.");
    }

    #[test]
    fn test_room_name_from_code_only() {
        let info = hotel();
        let dm = manager(info.clone());
        let ctx = context(&info);
        let mut entities = Entities::new("dlx");
        entities.room_code = Some("DLX".to_string());
        let values = dm.template_values(&ctx, "inquire_price", &entities);
        assert_eq!(values["room_type"], "Deluxe King Room");
    }

    #[test]
    fn test_price_question_without_room_quotes_default_room() {
        let info = hotel();
        let dm = manager(info.clone());
        let ctx = context(&info);
        let values = dm.template_values(&ctx, "inquire_price", &Entities::new("how much"));
        let price: f64 = values["price"].parse().unwrap();
        assert!(price == 129.0 || price == 159.0);
        assert_eq!(values["room_type"], "room");

        let values = dm.template_values(&ctx, "greet", &Entities::new("hi"));
        assert_eq!(values["price"], "our nightly rate");
    }

    #[test]
    fn test_missing_default_room_uses_fallback_price() {
        let mut info = hotel();
        info.room_types.retain(|room| room.code != "STD");
        let dm = manager(info.clone());
        let ctx = context(&info);
        let values = dm.template_values(&ctx, "inquire_price", &Entities::new("how much"));
        assert_eq!(values["price"], "150.00");
    }

    #[test]
    fn test_literal_defaults() {
        let info = hotel();
        let dm = manager(info.clone());
        let ctx = context(&info);
        let values = dm.template_values(&ctx, "greet", &Entities::new("hi"));
        assert_eq!(values["check_in"], "your arrival date");
        assert_eq!(values["check_out"], "your departure date");
        assert_eq!(values["guests_total"], "your group");
        assert_eq!(values["adults"], "your group");
        assert_eq!(values["children"], "0");
        assert_eq!(values["children_txt"], "");
        assert_eq!(values["amenity"], "the amenity");
        assert_eq!(values["reservation_id"], "your reservation");
        assert_eq!(values["nights"], "");
    }

    #[test]
    fn test_amenity_answer() {
        let info = hotel();
        let mut ctx = context(&info);
        let mut entities = Entities::new("is there parking");
        entities.amenity = Some("parking".to_string());
        let reply = manager(info).respond(&mut ctx, "inquire_parking", &entities);
        assert_eq!(reply, "Self-parking is $25 per night.");
    }

    #[test]
    fn test_confirm_and_special_requests() {
        let info = hotel();
        let dm = manager(info.clone());
        let mut ctx = context(&info);

        let mut entities = Entities::new("confirm 1a2b3c4d");
        entities.reservation_id = Some("1a2b3c4d".to_string());
        dm.respond(&mut ctx, "confirm", &entities);
        assert!(ctx.booking().confirmed);

        let mut late = Entities::new("late checkout at 2 pm");
        late.time_request = Some("02:00 pm".to_string());
        dm.respond(&mut ctx, "request_late_checkout", &late);
        assert_eq!(ctx.preferences().special_requests, vec!["late checkout at 02:00 pm"]);
    }
}
