//! Word data models shared by the lookup pipeline, history store and quiz.
//!
//! A [`WordEntry`] is what the definition provider returns. Once saved it
//! becomes a [`PersistedWordEntry`] carrying a store-assigned id and a
//! [`Category`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Word Entry
// ============================================================================

/// A single usage example: text in the source language and its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub source: String,
    pub target: String,
}

impl Example {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A dictionary definition as returned by the definition provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Headword. Non-empty and trimmed.
    pub word: String,
    /// Language of the headword (e.g. "marathi").
    pub language: String,
    /// Short meaning, used as the quiz answer.
    pub meaning: String,
    /// Longer explanation.
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl WordEntry {
    /// Create an entry with just a word and meaning. The word is trimmed.
    pub fn new(word: impl AsRef<str>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.as_ref().trim().to_string(),
            language: String::new(),
            meaning: meaning.into(),
            explanation: String::new(),
            examples: Vec::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }

    /// True when the headword is non-empty and has no surrounding whitespace.
    pub fn is_valid(&self) -> bool {
        !self.word.is_empty() && self.word.trim() == self.word
    }
}

// ============================================================================
// Category
// ============================================================================

/// Which history list a saved word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    InReview,
    Mastered,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::InReview, Category::Mastered];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::InReview => "in_review",
            Category::Mastered => "mastered",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::InReview => "In review",
            Category::Mastered => "Mastered",
        }
    }

    /// The category a word moves to when toggled.
    pub fn other(self) -> Category {
        match self {
            Category::InReview => Category::Mastered,
            Category::Mastered => Category::InReview,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_review" => Ok(Category::InReview),
            "mastered" => Ok(Category::Mastered),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

// ============================================================================
// Persisted Entry
// ============================================================================

/// A word entry that has been saved to the history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedWordEntry {
    /// Opaque, store-assigned identifier.
    pub id: String,
    #[serde(flatten)]
    pub entry: WordEntry,
    pub category: Category,
    /// How many times the word has been looked up and saved.
    pub lookup_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PersistedWordEntry {
    pub fn word(&self) -> &str {
        &self.entry.word
    }
}
