//! Static pattern tables for the input validator

use once_cell::sync::Lazy;
use regex::Regex;

static SHORT_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]{1,2}$").unwrap());
static LEADING_NON_VOWELS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^aeiou\s]{5,}").unwrap());
static CONSONANT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[b-df-hj-np-tv-z]{5,}").unwrap());
static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());
static SYMBOLS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[[:punct:]]+$").unwrap());
static LETTER_DIGIT_MIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+\d+[a-z]+\d+").unwrap());

/// Shapes of input that are rejected as gibberish
///
/// Patterns run against the trimmed, lower-cased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GibberishPattern {
    /// One or two bare letters ("x", "qz")
    ShortLetters,
    /// Same leading character four or more times ("aaaa")
    RepeatedChar,
    /// Five or more consecutive non-vowel letters: at the start of the text,
    /// or anywhere inside a single token ("asdfghjkl")
    ConsonantRun,
    DigitsOnly,
    SymbolsOnly,
    /// Alternating letter/digit runs ("abc123def456")
    LetterDigitMix,
}

impl GibberishPattern {
    pub const ALL: [GibberishPattern; 6] = [
        GibberishPattern::ShortLetters,
        GibberishPattern::RepeatedChar,
        GibberishPattern::ConsonantRun,
        GibberishPattern::DigitsOnly,
        GibberishPattern::SymbolsOnly,
        GibberishPattern::LetterDigitMix,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GibberishPattern::ShortLetters => "short_letters",
            GibberishPattern::RepeatedChar => "repeated_char",
            GibberishPattern::ConsonantRun => "consonant_run",
            GibberishPattern::DigitsOnly => "digits_only",
            GibberishPattern::SymbolsOnly => "symbols_only",
            GibberishPattern::LetterDigitMix => "letter_digit_mix",
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            GibberishPattern::ShortLetters => SHORT_LETTERS.is_match(text),
            GibberishPattern::RepeatedChar => has_repeated_prefix(text, 4),
            GibberishPattern::ConsonantRun => {
                LEADING_NON_VOWELS.is_match(text)
                    || (!text.contains(char::is_whitespace) && CONSONANT_RUN.is_match(text))
            }
            GibberishPattern::DigitsOnly => DIGITS_ONLY.is_match(text),
            GibberishPattern::SymbolsOnly => SYMBOLS_ONLY.is_match(text),
            GibberishPattern::LetterDigitMix => LETTER_DIGIT_MIX.is_match(text),
        }
    }

    /// First pattern matching `text`
    pub fn find(text: &str) -> Option<GibberishPattern> {
        Self::ALL.iter().copied().find(|pattern| pattern.is_match(text))
    }
}

fn has_repeated_prefix(text: &str, min_len: usize) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => chars.take(min_len - 1).filter(|c| *c == first).count() == min_len - 1,
        None => false,
    }
}

/// Greeting, politeness and identity phrasings accepted without domain words
pub static ACCEPTABLE_PHRASE_PATTERNS: &[&str] = &[
    r"\b(hi|hello|hey|good\s+(morning|afternoon|evening|day))\b",
    r"\b(thank|thanks|thx|ty)\b",
    r"\b(bye|goodbye|see\s+you)\b",
    r"\b(yes|yea|yeah|yep|no|nope)\b",
    r"\b(ok|okay|sure|fine|alright)\b",
    r"\b(who|what)\s+(are|is)\s+you\b",
    r"\b(tell|say)\s+(me\s+)?(about\s+)?(you|yourself)\b",
    r"\byour\s+(name|info|information)\b",
];

static ACCEPTABLE_PHRASES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ACCEPTABLE_PHRASE_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

pub fn is_acceptable_phrase(text: &str) -> bool {
    ACCEPTABLE_PHRASES.iter().any(|re| re.is_match(text))
}

static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]+\b").unwrap());

/// Purely alphabetic tokens
pub fn word_tokens(text: &str) -> Vec<&str> {
    WORD_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Heuristic check that a lower-cased word could be English
///
/// Requires a vowel (or y), rejects runs of four or more non-vowels and any
/// immediately repeated two-character chunk ("abab").
pub fn is_likely_real_word(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return true;
    }

    if !chars.iter().any(|c| is_vowel(*c)) {
        return false;
    }

    let mut run = 0;
    for c in &chars {
        if is_vowel(*c) || c.is_whitespace() {
            run = 0;
        } else {
            run += 1;
            if run >= 4 {
                return false;
            }
        }
    }

    if chars.len() > 3 {
        for i in 0..chars.len() - 3 {
            if chars[i..i + 2] == chars[i + 2..i + 4] {
                return false;
            }
        }
    }

    true
}
