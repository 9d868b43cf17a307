//! Word lists consulted by the input validator

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Words that signal a question or request
pub static QUESTION_WORDS: &[&str] = &[
    "what", "when", "where", "who", "why", "how", "which", "whose", "can", "could", "would",
    "should", "will", "do", "does", "did", "is", "are", "was", "were", "has", "have", "had", "am",
    "tell", "show", "give", "get", "need", "want", "looking", "explain", "describe", "say", "know",
];

/// Hotel and booking vocabulary
pub static DOMAIN_KEYWORDS: &[&str] = &[
    // booking
    "book", "booking", "reserve", "reservation", "cancel", "cancellation", "confirm", "modify",
    "change", "update",
    // rooms
    "room", "suite", "deluxe", "standard", "family", "ocean", "type", "available",
    "availability", "vacant", "free",
    // dates
    "date", "day", "night", "week", "month", "today", "tomorrow", "check-in", "checkin",
    "check-out", "checkout", "arrival", "departure", "stay", "staying", "arrive", "leave",
    // pricing
    "price", "cost", "rate", "charge", "fee", "pay", "payment", "expensive", "cheap", "discount",
    "total",
    // amenities
    "amenity", "amenities", "facility", "facilities", "service", "services", "pool", "gym", "spa",
    "wifi", "parking", "breakfast", "restaurant", "pet", "pets", "dog", "cat",
    // guests
    "guest", "guests", "adult", "adults", "child", "children", "kid", "kids", "people", "person",
    // policies
    "policy", "policies", "rule", "rules", "regulation",
    // hotel info
    "hotel", "address", "location", "phone", "email", "contact",
    // requests
    "need", "want", "like", "prefer", "looking", "search", "find", "help", "information", "info",
    "details", "tell", "know",
    // politeness
    "hello", "hi", "hey", "greetings", "thanks", "thank", "please", "bye", "goodbye", "yes", "no",
    "ok", "okay",
    // identity
    "you", "your", "who", "name", "about",
];

/// Topics a hotel assistant cannot help with
pub static OFF_TOPIC_KEYWORDS: &[&str] = &[
    "capital", "country", "president", "cook", "recipe", "weather", "math", "calculate", "physics",
    "chemistry", "science", "sports", "game", "movie", "song", "music", "actor", "politics", "news",
    "stock", "market", "crypto", "programming", "code", "python", "javascript",
];

/// Very short inputs that are always let through the gibberish patterns
pub static ALLOWED_SHORT_WORDS: &[&str] = &["hi", "ok", "no"];

static QUESTION_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| QUESTION_WORDS.iter().copied().collect());

static DOMAIN_KEYWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DOMAIN_KEYWORDS.iter().copied().collect());

/// Whole-text membership in either vocabulary
pub fn is_vocabulary_word(text: &str) -> bool {
    DOMAIN_KEYWORD_SET.contains(text) || QUESTION_WORD_SET.contains(text)
}

/// Any question word occurring as a substring
pub fn contains_question_word(text: &str) -> bool {
    QUESTION_WORDS.iter().any(|word| text.contains(word))
}

/// Any domain keyword occurring as a substring
pub fn contains_domain_keyword(text: &str) -> bool {
    DOMAIN_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

pub fn contains_off_topic_keyword(text: &str) -> bool {
    OFF_TOPIC_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}
