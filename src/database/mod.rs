//! SQLite Database Module
//!
//! Stores the looked-up word history behind the [`HistoryStore`] contract.
//!
//! [`HistoryStore`]: crate::core::history::HistoryStore

mod migrations;
mod records;
mod words;

pub use migrations::run_migrations;
pub use records::WordRecord;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "wordhoard.db";

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the database in `data_dir` and run migrations.
    pub async fn new(data_dir: &Path) -> Result<Self, sqlx::Error> {
        let db_path = data_dir.join(DATABASE_FILE);

        if let Some(parent) = db_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create data directory {}: {e}", parent.display());
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", db_path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .connect_with(options)
            .await?;

        let db = Self {
            pool,
            path: Some(db_path),
        };
        migrations::run_migrations(&db.pool).await?;

        log::info!("Opened word history at {}", DATABASE_FILE);
        Ok(db)
    }

    /// A private in-memory database. Contents vanish when dropped.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        // Every connection to :memory: is its own database, so pin to one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Self { pool, path: None };
        migrations::run_migrations(&db.pool).await?;
        Ok(db)
    }

    /// Get the underlying pool for direct queries
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Database file path, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
