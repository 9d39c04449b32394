//! Row types for the `words` table.

use chrono::{DateTime, Utc};

use crate::core::history::{StoreError, StoreResult};
use crate::core::models::{Category, Example, PersistedWordEntry, WordEntry};

/// A row of the `words` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WordRecord {
    pub id: String,
    pub word: String,
    pub language: String,
    pub meaning: String,
    pub explanation: String,
    /// JSON array of examples.
    pub examples: String,
    pub category: String,
    pub lookup_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl WordRecord {
    pub fn into_persisted(self) -> StoreResult<PersistedWordEntry> {
        let examples: Vec<Example> = serde_json::from_str(&self.examples)?;
        let category = self
            .category
            .parse::<Category>()
            .map_err(StoreError::InvalidEntry)?;

        Ok(PersistedWordEntry {
            entry: WordEntry {
                word: self.word,
                language: self.language,
                meaning: self.meaning,
                explanation: self.explanation,
                examples,
            },
            category,
            lookup_count: u32::try_from(self.lookup_count).unwrap_or(u32::MAX),
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            id: self.id,
        })
    }
}

fn parse_timestamp(value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidEntry(format!("bad timestamp '{value}': {e}")))
}
