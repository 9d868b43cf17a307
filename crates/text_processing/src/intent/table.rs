//! Weighted keyword table for rule-based intent matching

/// Keyword groups for one intent
///
/// Each group is a set of synonyms; an utterance "covers" a group when it
/// contains any member as a substring.
#[derive(Debug, Clone, Copy)]
pub struct IntentKeywords {
    pub intent: &'static str,
    pub groups: &'static [&'static [&'static str]],
}

/// Intents in priority order: on equal scores the earlier entry wins
pub static INTENT_KEYWORDS: &[IntentKeywords] = &[
    IntentKeywords {
        intent: "greet",
        groups: &[&["hello", "hi", "hey", "greetings", "good morning", "good afternoon", "good evening"]],
    },
    IntentKeywords {
        intent: "goodbye",
        groups: &[&["bye", "goodbye", "see you", "later", "farewell", "exit", "quit"]],
    },
    IntentKeywords {
        intent: "thanks",
        groups: &[&["thank", "thanks", "appreciate", "grateful", "thx"]],
    },
    IntentKeywords {
        intent: "inquire_identity",
        groups: &[&["who", "you"], &["what", "you"]],
    },
    IntentKeywords {
        intent: "inquire_availability",
        groups: &[
            &["available", "availability", "check", "vacant", "free", "open"],
            &["room", "rooms", "booking", "reservation"],
        ],
    },
    IntentKeywords {
        intent: "inquire_price",
        groups: &[&["price", "cost", "rate", "charge", "fee", "how much", "expensive", "cheap"]],
    },
    IntentKeywords {
        intent: "inquire_room_type",
        groups: &[&["room type", "types of room", "what room", "which room", "room option", "category"]],
    },
    IntentKeywords {
        intent: "inquire_amenities",
        groups: &[
            &["amenity", "amenities", "facility", "facilities", "service", "services", "feature", "features"],
            &["have", "offer", "provide", "include", "available"],
        ],
    },
    IntentKeywords {
        intent: "inquire_cancellation_policy",
        groups: &[&["cancel", "cancellation", "refund", "policy", "cancel policy", "refund policy"]],
    },
    IntentKeywords {
        intent: "inquire_checkin_time",
        groups: &[
            &["check in", "check-in", "checkin", "arrival", "arrive", "come in"],
            &["time", "hour", "when", "what time"],
        ],
    },
    IntentKeywords {
        intent: "inquire_checkout_time",
        groups: &[
            &["check out", "check-out", "checkout", "departure", "depart", "leave"],
            &["time", "hour", "when", "what time"],
        ],
    },
    IntentKeywords {
        intent: "inquire_parking",
        groups: &[&["parking", "park", "car park", "garage", "vehicle"]],
    },
    IntentKeywords {
        intent: "inquire_pet_policy",
        groups: &[&["pet", "pets", "dog", "cat", "animal"]],
    },
    IntentKeywords {
        intent: "make_reservation",
        groups: &[&["book", "reserve", "reservation", "booking", "want to book", "make a reservation"]],
    },
    IntentKeywords {
        intent: "change_dates",
        groups: &[&["change", "modify", "update", "adjust"], &["date", "dates", "day", "days"]],
    },
    IntentKeywords {
        intent: "change_room_type",
        groups: &[&["change", "modify", "update", "switch", "upgrade"], &["room", "room type"]],
    },
    IntentKeywords {
        intent: "change_guest_count",
        groups: &[
            &["change", "modify", "update", "adjust"],
            &["guest", "guests", "people", "person", "adult", "adults", "children"],
        ],
    },
    IntentKeywords {
        intent: "cancel_reservation",
        groups: &[&["cancel", "cancellation", "abort", "remove"], &["reservation", "booking"]],
    },
    IntentKeywords {
        intent: "confirm",
        groups: &[&["yes", "confirm", "ok", "okay", "sure", "proceed", "go ahead", "correct", "right"]],
    },
    IntentKeywords {
        intent: "deny",
        groups: &[&["no", "nope", "cancel", "don't", "never mind", "not now", "wrong"]],
    },
    IntentKeywords {
        intent: "request_late_checkout",
        groups: &[&["late", "extend", "later"], &["checkout", "check out", "check-out"]],
    },
    IntentKeywords {
        intent: "request_early_checkin",
        groups: &[&["early", "earlier", "before"], &["checkin", "check in", "check-in", "arrival"]],
    },
    IntentKeywords {
        intent: "request_invoice",
        groups: &[&["invoice", "receipt", "bill", "statement", "payment confirmation"]],
    },
    IntentKeywords {
        intent: "complaint_noise",
        groups: &[&["noise", "noisy", "loud", "sound"], &["complaint", "complain", "problem", "issue"]],
    },
    IntentKeywords {
        intent: "complaint_cleanliness",
        groups: &[
            &["clean", "cleanliness", "dirty", "mess", "tidy"],
            &["complaint", "complain", "problem", "issue"],
        ],
    },
    IntentKeywords {
        intent: "complaint_billing",
        groups: &[
            &["billing", "charge", "payment", "invoice", "bill"],
            &["complaint", "complain", "problem", "issue", "wrong", "error"],
        ],
    },
    IntentKeywords {
        intent: "feedback_positive",
        groups: &[&["great", "excellent", "wonderful", "amazing", "love", "fantastic", "perfect", "good job"]],
    },
    IntentKeywords {
        intent: "feedback_negative",
        groups: &[&["bad", "terrible", "awful", "horrible", "disappointed", "poor", "worst"]],
    },
];
