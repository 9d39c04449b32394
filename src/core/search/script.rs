//! Script detection for suggestion queries.
//!
//! The detected script only chooses which suggestion endpoint to call.
//! It has no bearing on whether a lookup is admitted.

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use regex::Regex;

/// Devanagari Unicode block.
const DEVANAGARI: RangeInclusive<char> = '\u{0900}'..='\u{097F}';

static LATIN_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]+$").expect("static regex is valid")
});

/// Writing system of a settled search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Latin,
    Devanagari,
    Other,
}

impl Script {
    pub fn as_str(self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Devanagari => "devanagari",
            Script::Other => "other",
        }
    }
}

/// Classify a term: any Devanagari code point wins, then Latin letters only.
pub fn classify(term: &str) -> Script {
    if term.chars().any(|c| DEVANAGARI.contains(&c)) {
        Script::Devanagari
    } else if LATIN_WORD.is_match(term) {
        Script::Latin
    } else {
        Script::Other
    }
}

/// A suggestion request for a settled term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionQuery {
    pub raw_term: String,
    pub script: Script,
}

impl SuggestionQuery {
    pub fn new(raw_term: impl Into<String>) -> Self {
        let raw_term = raw_term.into();
        let script = classify(&raw_term);
        Self { raw_term, script }
    }
}
