//! Word history operations.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};

use super::records::WordRecord;
use super::Database;
use crate::core::history::{HistoryStore, StoreError, StoreResult};
use crate::core::models::{Category, PersistedWordEntry, WordEntry};

/// Fixed-width UTC timestamp so text ordering matches time ordering.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[async_trait]
impl HistoryStore for Database {
    async fn save(&self, entry: &WordEntry) -> StoreResult<PersistedWordEntry> {
        if !entry.is_valid() {
            return Err(StoreError::InvalidEntry(format!(
                "word must be non-empty and trimmed: {:?}",
                entry.word
            )));
        }

        // Keep this a single statement: a read-then-write transaction gets
        // SQLITE_BUSY when saves overlap.
        let examples = serde_json::to_string(&entry.examples)?;
        let now = timestamp();
        let record = sqlx::query_as::<_, WordRecord>(
            r#"
            INSERT INTO words
                (id, word, language, meaning, explanation, examples,
                 category, lookup_count, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?, ?)
            ON CONFLICT (word COLLATE NOCASE) DO UPDATE SET
                lookup_count = lookup_count + 1,
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(&entry.word)
        .bind(&entry.language)
        .bind(&entry.meaning)
        .bind(&entry.explanation)
        .bind(&examples)
        .bind(Category::InReview.as_str())
        .bind(&now)
        .bind(&now)
        .fetch_one(self.pool())
        .await?;

        record.into_persisted()
    }

    async fn list(&self, category: Category) -> StoreResult<Vec<PersistedWordEntry>> {
        let records = sqlx::query_as::<_, WordRecord>(
            "SELECT * FROM words WHERE category = ? ORDER BY updated_at DESC, rowid DESC",
        )
        .bind(category.as_str())
        .fetch_all(self.pool())
        .await?;

        records.into_iter().map(WordRecord::into_persisted).collect()
    }

    async fn delete_by_id(&self, id: &str, category: Category) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM words WHERE id = ? AND category = ?")
            .bind(id)
            .bind(category.as_str())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("{category} word {id}")));
        }
        Ok(())
    }

    async fn set_category(&self, id: &str, category: Category) -> StoreResult<PersistedWordEntry> {
        let now = timestamp();
        let result = sqlx::query("UPDATE words SET category = ?, updated_at = ? WHERE id = ?")
            .bind(category.as_str())
            .bind(&now)
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("word {id}")));
        }

        sqlx::query_as::<_, WordRecord>("SELECT * FROM words WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool())
            .await?
            .into_persisted()
    }
}
