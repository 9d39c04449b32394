//! Test Fixtures
//!
//! Provides shared helpers for creating test databases and word entries.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tempfile::TempDir;

use crate::core::models::{Category, Example, PersistedWordEntry, WordEntry};
use crate::database::Database;

// =============================================================================
// Database Fixtures
// =============================================================================

/// Create a test database in a temporary directory.
/// Returns both the database and the TempDir (which must be kept alive).
pub async fn create_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db = Database::new(temp_dir.path())
        .await
        .expect("Failed to create test database");
    (db, temp_dir)
}

// =============================================================================
// Word Fixtures
// =============================================================================

pub fn word(word: &str, meaning: &str) -> WordEntry {
    WordEntry::new(word, meaning).with_language("english")
}

/// A fully populated Marathi entry, as the dictionary backend returns it.
pub fn marathi_entry() -> WordEntry {
    WordEntry::new("पाणी", "water")
        .with_language("marathi")
        .with_explanation("The clear liquid that forms rain, rivers and seas.")
        .with_example(Example::new("मला पाणी हवे आहे.", "I want water."))
        .with_example(Example::new("पाणी थंड आहे.", "The water is cold."))
}

pub fn persisted(id: &str, entry: WordEntry, category: Category) -> PersistedWordEntry {
    let now = Utc::now();
    PersistedWordEntry {
        id: id.to_string(),
        entry,
        category,
        lookup_count: 1,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Async Helpers
// =============================================================================

/// Poll `check` until it holds, yielding to spawned tasks in between.
/// Panics after two seconds.
pub async fn wait_until<F>(mut check: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !check() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Await a future with a two second limit.
pub async fn within<T>(future: impl Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(2), future)
        .await
        .expect("timed out")
}
