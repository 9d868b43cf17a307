//! Input validation
//!
//! Gates raw user text before any NLU runs. Rules are evaluated in a fixed
//! order and the first decisive rule wins; several rules overlap, so the
//! order itself defines behavior on borderline inputs.
//!
//! # Example
//!
//! ```ignore
//! use hotel_concierge_text_processing::InputValidator;
//!
//! let validator = InputValidator::new();
//! let outcome = validator.validate("asdfghjkl");
//! assert!(!outcome.is_valid);
//! ```

pub mod patterns;
pub mod vocabulary;

use hotel_concierge_core::{RejectionReason, ValidationAnalysis, ValidationDiagnostics};

pub use patterns::{is_likely_real_word, GibberishPattern};

use patterns::{is_acceptable_phrase, word_tokens};
use vocabulary::{
    contains_domain_keyword, contains_off_topic_keyword, contains_question_word,
    is_vocabulary_word, ALLOWED_SHORT_WORDS,
};

/// Result of validating one utterance
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub is_valid: bool,
    /// Guidance shown to the user; empty when valid
    pub message: &'static str,
    pub analysis: ValidationAnalysis,
}

impl Validation {
    fn accept(diagnostics: ValidationDiagnostics) -> Self {
        Self {
            is_valid: true,
            message: "",
            analysis: ValidationAnalysis {
                reason: None,
                diagnostics: Some(diagnostics),
            },
        }
    }

    fn reject(reason: RejectionReason) -> Self {
        Self {
            is_valid: false,
            message: guidance(reason),
            analysis: ValidationAnalysis::rejected(reason),
        }
    }

    fn reject_with(reason: RejectionReason, diagnostics: ValidationDiagnostics) -> Self {
        Self {
            is_valid: false,
            message: guidance(reason),
            analysis: ValidationAnalysis {
                reason: Some(reason),
                diagnostics: Some(diagnostics),
            },
        }
    }

    pub fn reason(&self) -> Option<RejectionReason> {
        self.analysis.reason
    }
}

/// User-facing guidance for each rejection reason
pub fn guidance(reason: RejectionReason) -> &'static str {
    match reason {
        RejectionReason::Empty => "Please type something. How can I help you?",
        RejectionReason::TooShort => "Please ask a complete question. I'm here to help with hotel reservations, room information, amenities, and policies.",
        RejectionReason::GibberishPattern => "That doesn't seem like a valid question. Please ask about hotel reservations, room availability, pricing, or our services.",
        RejectionReason::RepeatedWords => "Please ask a meaningful question. I can help you with bookings, room types, amenities, check-in/out times, and hotel policies.",
        RejectionReason::GibberishWord => "That doesn't look like a valid word or question. Please ask about hotel reservations, room availability, pricing, or our services.",
        RejectionReason::SingleInvalidWord => "I'm a hotel chatbot. Please ask a question about:\n• Room bookings and availability\n• Pricing and rates\n• Hotel amenities and services\n• Check-in/check-out policies\n• Contact information",
        RejectionReason::LowWordValidity => "I couldn't understand that. Please ask a clear question about hotel services, such as:\n• 'Do you have rooms available?'\n• 'What's the price for a deluxe room?'\n• 'When is check-in time?'",
        RejectionReason::OffTopicDetected => "I'm a hotel reservation assistant and can only help with hotel-related questions like:\n✓ Room bookings and availability\n✓ Pricing and rates\n✓ Amenities and services\n✓ Check-in/check-out policies\n✓ Hotel information\n\nPlease ask something about your hotel stay.",
        RejectionReason::OffTopic => "That doesn't seem related to hotel services. I can help you with:\n✓ Room reservations\n✓ Availability and pricing\n✓ Amenities (WiFi, parking, pets, etc.)\n✓ Hotel policies\n\nWhat would you like to know?",
        RejectionReason::UnclearIntent => "I'm not sure what you're asking. Please try asking about:\n• Room availability: 'Do you have rooms from Dec 10-12?'\n• Pricing: 'How much is a deluxe room?'\n• Amenities: 'Do you have parking?'\n• Policies: 'What's your cancellation policy?'",
    }
}

/// Stateless gate separating hotel questions from gibberish and off-topic text
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate raw user input
    pub fn validate(&self, text: &str) -> Validation {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Validation::reject(RejectionReason::Empty);
        }

        let clean = trimmed.to_lowercase();
        let clean = clean.as_str();

        if clean.chars().count() < 2 {
            return Validation::reject(RejectionReason::TooShort);
        }

        if !ALLOWED_SHORT_WORDS.contains(&clean) {
            if let Some(pattern) = GibberishPattern::find(clean) {
                if !is_vocabulary_word(clean) {
                    tracing::debug!(pattern = pattern.name(), "Input matched gibberish pattern");
                    return Validation::reject(RejectionReason::GibberishPattern);
                }
            }
        }

        let words: Vec<&str> = clean.split_whitespace().collect();
        if words.len() > 2 && words.iter().all(|w| *w == words[0]) {
            return Validation::reject(RejectionReason::RepeatedWords);
        }

        if words.len() == 1
            && clean.chars().count() > 7
            && !is_likely_real_word(clean)
            && !is_vocabulary_word(clean)
        {
            return Validation::reject(RejectionReason::GibberishWord);
        }

        let tokens = word_tokens(clean);
        let word_validity_ratio = if tokens.is_empty() {
            0.0
        } else {
            let valid = tokens.iter().filter(|w| is_likely_real_word(w)).count();
            valid as f32 / tokens.len() as f32
        };

        let diagnostics = ValidationDiagnostics {
            has_question_word: contains_question_word(clean),
            has_question_mark: text.contains('?'),
            has_domain_keyword: contains_domain_keyword(clean),
            word_validity_ratio,
            word_count: words.len(),
        };

        Self::classify(clean, &words, tokens.len(), diagnostics)
    }

    fn classify(
        clean: &str,
        words: &[&str],
        token_count: usize,
        diagnostics: ValidationDiagnostics,
    ) -> Validation {
        let d = &diagnostics;

        if words.len() == 1
            && !d.has_domain_keyword
            && !d.has_question_word
            && !is_vocabulary_word(words[0])
        {
            return Validation::reject_with(RejectionReason::SingleInvalidWord, diagnostics);
        }

        if d.word_validity_ratio < 0.3 && token_count > 2 {
            return Validation::reject_with(RejectionReason::LowWordValidity, diagnostics);
        }

        if (d.has_question_word || d.has_question_mark)
            && !d.has_domain_keyword
            && words.len() > 2
            && contains_off_topic_keyword(clean)
        {
            return Validation::reject_with(RejectionReason::OffTopicDetected, diagnostics);
        }

        if !d.has_domain_keyword
            && !d.has_question_word
            && words.len() > 2
            && d.word_validity_ratio < 0.6
        {
            return Validation::reject_with(RejectionReason::OffTopic, diagnostics);
        }

        if d.has_question_word || d.has_question_mark || d.has_domain_keyword {
            return Validation::accept(diagnostics);
        }

        if is_acceptable_phrase(clean) {
            return Validation::accept(diagnostics);
        }

        if d.word_validity_ratio >= 0.5 {
            return Validation::accept(diagnostics);
        }

        Validation::reject_with(RejectionReason::UnclearIntent, diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(text: &str) -> Option<RejectionReason> {
        InputValidator::new().validate(text).reason()
    }

    #[test]
    fn test_empty_and_short() {
        assert_eq!(reason("   "), Some(RejectionReason::Empty));
        assert_eq!(reason("x"), Some(RejectionReason::TooShort));
    }

    #[test]
    fn test_keyboard_mash_is_gibberish_pattern() {
        let outcome = InputValidator::new().validate("asdfghjkl");
        assert!(!outcome.is_valid);
        assert_eq!(outcome.reason(), Some(RejectionReason::GibberishPattern));
        assert_eq!(outcome.message, guidance(RejectionReason::GibberishPattern));
        assert!(outcome.analysis.diagnostics.is_none());
    }

    #[test]
    fn test_gibberish_patterns() {
        for text in ["qz", "aaaaaa", "123456", "@@@", "abc123def456"] {
            assert_eq!(reason(text), Some(RejectionReason::GibberishPattern), "{}", text);
        }
    }

    #[test]
    fn test_allowlisted_short_words_pass() {
        assert!(InputValidator::new().validate("hi").is_valid);
        assert!(InputValidator::new().validate("OK").is_valid);
    }

    #[test]
    fn test_vocabulary_word_overrides_pattern() {
        // two letters, but a question word
        assert!(InputValidator::new().validate("do").is_valid);
    }

    #[test]
    fn test_repeated_words() {
        assert_eq!(reason("book book book book"), Some(RejectionReason::RepeatedWords));
        // two repetitions are not enough
        assert_ne!(reason("book book"), Some(RejectionReason::RepeatedWords));
    }

    #[test]
    fn test_long_gibberish_word() {
        assert_eq!(reason("ababababab"), Some(RejectionReason::GibberishWord));
    }

    #[test]
    fn test_single_invalid_word() {
        assert_eq!(reason("banana"), Some(RejectionReason::SingleInvalidWord));
        assert!(InputValidator::new().validate("parking").is_valid);
    }

    #[test]
    fn test_off_topic_question() {
        assert_eq!(
            reason("what is the capital of france"),
            Some(RejectionReason::OffTopicDetected)
        );
    }

    #[test]
    fn test_low_word_validity() {
        assert_eq!(reason("xkq zzkt bcd"), Some(RejectionReason::LowWordValidity));
    }

    #[test]
    fn test_off_topic_statement() {
        // one plausible word out of three
        assert_eq!(reason("blorft xkq zzkt"), Some(RejectionReason::OffTopic));
    }

    #[test]
    fn test_unclear_two_word_input() {
        let outcome = InputValidator::new().validate("xkq zzkt");
        assert_eq!(outcome.reason(), Some(RejectionReason::UnclearIntent));
        assert_eq!(outcome.message, guidance(RejectionReason::UnclearIntent));
        assert_eq!(outcome.analysis.diagnostics.unwrap().word_validity_ratio, 0.0);

        // half the words look real: accepted on word validity alone
        assert!(InputValidator::new().validate("blorft zzkt").is_valid);
    }

    #[test]
    fn test_hotel_questions_are_valid() {
        let validator = InputValidator::new();
        for text in [
            "Do you have rooms from 2025-12-10 to 2025-12-12?",
            "how much will it cost",
            "book a deluxe room for 2 adults",
            "who are you",
        ] {
            let outcome = validator.validate(text);
            assert!(outcome.is_valid, "{} rejected: {:?}", text, outcome.reason());
            assert!(outcome.message.is_empty());
        }
    }

    #[test]
    fn test_diagnostics_are_reported() {
        let outcome = InputValidator::new().validate("Is parking free?");
        let diagnostics = outcome.analysis.diagnostics.unwrap();
        assert!(diagnostics.has_question_mark);
        assert!(diagnostics.has_domain_keyword);
        assert_eq!(diagnostics.word_count, 3);
        assert_eq!(diagnostics.word_validity_ratio, 1.0);
    }

    #[test]
    fn test_every_reason_has_distinct_guidance() {
        let mut messages: Vec<&str> = RejectionReason::ALL.iter().map(|r| guidance(*r)).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), RejectionReason::ALL.len());
    }
}
