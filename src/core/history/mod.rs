//! Saved-word history.
//!
//! [`HistoryStore`] is the persistence contract; the SQLite implementation
//! lives in `crate::database`. [`HistoryBook`] is the locally cached listing
//! a view works against.

pub mod book;
pub mod error;

use async_trait::async_trait;

use crate::core::models::{Category, PersistedWordEntry, WordEntry};

pub use book::HistoryBook;
pub use error::{StoreError, StoreResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Save a looked-up word. A word already present gets its lookup count bumped.
    async fn save(&self, entry: &WordEntry) -> StoreResult<PersistedWordEntry>;

    /// All entries in a category, most recently updated first.
    async fn list(&self, category: Category) -> StoreResult<Vec<PersistedWordEntry>>;

    /// Delete by id. `StoreError::NotFound` if no entry matches.
    async fn delete_by_id(&self, id: &str, category: Category) -> StoreResult<()>;

    /// Move an entry to another category.
    async fn set_category(&self, id: &str, category: Category) -> StoreResult<PersistedWordEntry>;
}
