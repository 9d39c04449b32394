//! Word History Database Tests
//!
//! Tests for the SQLite `HistoryStore`: save/upsert, listing order,
//! delete by id, category transitions and persistence across reopen.

use crate::core::history::{HistoryStore, StoreError};
use crate::core::models::{Category, WordEntry};
use crate::database::Database;
use crate::tests::common::{create_test_db, marathi_entry, word};

// =============================================================================
// Save
// =============================================================================

#[tokio::test]
async fn test_save_new_word() {
    let (db, _temp) = create_test_db().await;

    let saved = db.save(&word("cat", "a feline")).await.expect("Failed to save");
    assert!(!saved.id.is_empty());
    assert_eq!(saved.word(), "cat");
    assert_eq!(saved.category, Category::InReview);
    assert_eq!(saved.lookup_count, 1);
    assert_eq!(saved.created_at, saved.updated_at);
}

#[tokio::test]
async fn test_save_existing_word_bumps_count() {
    let (db, _temp) = create_test_db().await;

    let first = db.save(&word("cat", "a feline")).await.unwrap();
    let second = db.save(&word("Cat", "a small feline")).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.lookup_count, 2);
    assert_eq!(second.word(), "cat");
    assert_eq!(second.entry.meaning, "a feline");
    assert!(second.updated_at >= first.updated_at);

    let listed = db.list(Category::InReview).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_save_keeps_examples_and_script() {
    let (db, _temp) = create_test_db().await;

    let entry = marathi_entry();
    let saved = db.save(&entry).await.unwrap();
    assert_eq!(saved.entry, entry);

    let listed = db.list(Category::InReview).await.unwrap();
    assert_eq!(listed[0].entry.examples.len(), 2);
    assert_eq!(listed[0].entry.examples[0].target, "I want water.");
}

#[tokio::test]
async fn test_save_rejects_invalid_entry() {
    let db = Database::in_memory().await.unwrap();

    let mut entry = WordEntry::new("dog", "a canine");
    entry.word = "  dog".to_string();
    let err = db.save(&entry).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidEntry(_)));

    let err = db.save(&WordEntry::new("", "nothing")).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidEntry(_)));
    assert!(db.list(Category::InReview).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_of_same_word_all_count() {
    let (db, _temp) = create_test_db().await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let db = db.clone();
            tokio::spawn(async move { db.save(&word("cat", "a feline")).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let saved = handle.await.unwrap().expect("concurrent save failed");
        ids.push(saved.id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);

    let listed = db.list(Category::InReview).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].lookup_count, 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_of_distinct_words_all_stored() {
    let (db, _temp) = create_test_db().await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let db = db.clone();
            tokio::spawn(async move { db.save(&word(&format!("word{i}"), "meaning")).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().expect("concurrent save failed");
    }

    let listed = db.list(Category::InReview).await.unwrap();
    assert_eq!(listed.len(), 8);
    assert!(listed.iter().all(|w| w.lookup_count == 1));
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_most_recent_first() {
    let db = Database::in_memory().await.unwrap();
    for (w, m) in [("one", "1"), ("two", "2"), ("three", "3")] {
        db.save(&word(w, m)).await.unwrap();
    }
    // Looking "one" up again makes it the most recent.
    db.save(&word("one", "1")).await.unwrap();

    let words: Vec<String> = db
        .list(Category::InReview)
        .await
        .unwrap()
        .iter()
        .map(|e| e.word().to_string())
        .collect();
    assert_eq!(words, ["one", "three", "two"]);
}

#[tokio::test]
async fn test_list_filters_by_category() {
    let db = Database::in_memory().await.unwrap();
    let cat = db.save(&word("cat", "a feline")).await.unwrap();
    db.save(&word("dog", "a canine")).await.unwrap();
    db.set_category(&cat.id, Category::Mastered).await.unwrap();

    let in_review = db.list(Category::InReview).await.unwrap();
    let mastered = db.list(Category::Mastered).await.unwrap();
    assert_eq!(in_review.len(), 1);
    assert_eq!(in_review[0].word(), "dog");
    assert_eq!(mastered.len(), 1);
    assert_eq!(mastered[0].id, cat.id);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_by_id() {
    let db = Database::in_memory().await.unwrap();
    let cat = db.save(&word("cat", "a feline")).await.unwrap();
    let dog = db.save(&word("dog", "a canine")).await.unwrap();

    db.delete_by_id(&cat.id, Category::InReview)
        .await
        .expect("Failed to delete");

    let remaining = db.list(Category::InReview).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, dog.id);
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let db = Database::in_memory().await.unwrap();
    db.save(&word("cat", "a feline")).await.unwrap();

    let err = db
        .delete_by_id("no-such-id", Category::InReview)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(db.list(Category::InReview).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_in_wrong_category_is_not_found() {
    let db = Database::in_memory().await.unwrap();
    let cat = db.save(&word("cat", "a feline")).await.unwrap();

    let err = db
        .delete_by_id(&cat.id, Category::Mastered)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(db.list(Category::InReview).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_twice() {
    let db = Database::in_memory().await.unwrap();
    let cat = db.save(&word("cat", "a feline")).await.unwrap();

    db.delete_by_id(&cat.id, Category::InReview).await.unwrap();
    let err = db
        .delete_by_id(&cat.id, Category::InReview)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// Category transitions
// =============================================================================

#[tokio::test]
async fn test_set_category_round_trip() {
    let db = Database::in_memory().await.unwrap();
    let cat = db.save(&word("cat", "a feline")).await.unwrap();

    let mastered = db.set_category(&cat.id, Category::Mastered).await.unwrap();
    assert_eq!(mastered.category, Category::Mastered);
    assert_eq!(mastered.id, cat.id);
    assert_eq!(mastered.lookup_count, cat.lookup_count);

    let back = db.set_category(&cat.id, Category::InReview).await.unwrap();
    assert_eq!(back.category, Category::InReview);
}

#[tokio::test]
async fn test_set_category_unknown_id() {
    let db = Database::in_memory().await.unwrap();
    let err = db
        .set_category("missing", Category::Mastered)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_saving_mastered_word_keeps_category() {
    let db = Database::in_memory().await.unwrap();
    let cat = db.save(&word("cat", "a feline")).await.unwrap();
    db.set_category(&cat.id, Category::Mastered).await.unwrap();

    let again = db.save(&word("cat", "a feline")).await.unwrap();
    assert_eq!(again.category, Category::Mastered);
    assert_eq!(again.lookup_count, 2);
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_history_survives_reopen() {
    let (db, temp) = create_test_db().await;
    let saved = db.save(&marathi_entry()).await.unwrap();
    assert!(db.path().is_some());
    drop(db);

    let reopened = Database::new(temp.path()).await.expect("Failed to reopen");
    let listed = reopened.list(Category::InReview).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, saved.id);
    assert_eq!(listed[0].word(), "पाणी");
}
