//! Schema versioning.
//!
//! Applied versions are recorded in `_migrations`; on open, every version
//! above the recorded maximum is applied in order, each in its own
//! transaction.

use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::{debug, info};

/// One schema step. `sql` may hold several `;`-separated statements.
struct Migration {
    version: i32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_words",
        sql: r#"
            -- examples holds a JSON array of {source, target}
            CREATE TABLE IF NOT EXISTS words (
                id TEXT PRIMARY KEY,
                word TEXT NOT NULL,
                language TEXT NOT NULL DEFAULT '',
                meaning TEXT NOT NULL DEFAULT '',
                explanation TEXT NOT NULL DEFAULT '',
                examples TEXT NOT NULL DEFAULT '[]',
                category TEXT NOT NULL DEFAULT 'in_review',
                lookup_count INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE UNIQUE INDEX IF NOT EXISTS idx_words_word ON words(word COLLATE NOCASE)
        "#,
    },
    Migration {
        version: 2,
        name: "words_by_category_recent",
        sql: "CREATE INDEX IF NOT EXISTS idx_words_category_updated \
              ON words(category, updated_at DESC)",
    },
];

/// Latest schema version this build knows about.
pub const SCHEMA_VERSION: i32 = 2;

/// Bring the schema up to [`SCHEMA_VERSION`].
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .execute(pool)
    .await?;

    let applied = applied_version(pool).await?;
    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > applied).collect();
    if pending.is_empty() {
        debug!(version = applied, "Schema up to date");
        return Ok(());
    }

    info!(from = applied, to = SCHEMA_VERSION, "Migrating word history schema");
    for migration in pending {
        apply(pool, migration).await?;
    }
    Ok(())
}

async fn applied_version(pool: &SqlitePool) -> Result<i32, sqlx::Error> {
    let row = sqlx::query("SELECT COALESCE(MAX(version), 0) AS version FROM _migrations")
        .fetch_one(pool)
        .await?;
    row.try_get::<i32, _>("version")
}

async fn apply(pool: &SqlitePool, migration: &Migration) -> Result<(), sqlx::Error> {
    info!(version = migration.version, name = migration.name, "Applying migration");

    let mut tx = pool.begin().await?;
    for statement in migration.sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(&mut *tx)
        .await?;
    tx.commit().await
}
