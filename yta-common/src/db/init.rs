//! Database initialization and connection
//!
//! The lookup service only reads the catalog. `connect_readonly` is the
//! normal entrypoint; `init_database` creates an empty catalog on first run.

use crate::db::models::AudioEntry;
use crate::{Error, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets concurrent lookups read while the catalog is being loaded
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_entries_table(&pool).await?;

    Ok(pool)
}

/// Create the audio catalog table and lookup indexes (idempotent)
pub async fn create_entries_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            expression TEXT NOT NULL,
            reading TEXT NOT NULL,
            source TEXT NOT NULL,
            file TEXT NOT NULL,
            display TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_entries_expression ON entries(expression)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_entries_reading ON entries(reading)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Connect to an existing catalog in read-only mode
///
/// Fails with [`Error::NotFound`] when the database file does not exist;
/// a read-only connection cannot create it.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::NotFound(format!(
            "Database not found: {} (start with --init-db to create an empty catalog)",
            db_path.display()
        )));
    }

    // mode=ro: SQLite rejects every write on this connection
    let db_url = format!("sqlite://{}?mode=ro", db_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    Ok(pool)
}

/// Insert one catalog row, returning its rowid
pub async fn insert_entry(pool: &SqlitePool, entry: &AudioEntry) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO entries (expression, reading, source, file, display) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&entry.expression)
    .bind(&entry.reading)
    .bind(&entry.source)
    .bind(&entry.file)
    .bind(&entry.display)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Count catalog rows
pub async fn count_entries(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entries")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
