//! Catalog storage access
//!
//! The lookup pipeline only needs "fetch all rows matching this filter".
//! [`AudioStore`] is that seam; [`SqliteAudioStore`] is the production backend.

use async_trait::async_trait;
use sqlx::SqlitePool;
use thiserror::Error;
use yta_common::AudioEntry;

use super::filter::{AudioFilter, SqlParam};

/// Columns returned for every candidate, in `AudioEntry` field order
const SELECT_ENTRIES: &str = "SELECT expression, reading, source, file, display FROM entries";

/// Storage failure reported by an [`AudioStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Query execution failed
    #[error("Query failed: {0}")]
    Database(#[from] sqlx::Error),

    /// Backend could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Source of catalog rows
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Fetch every row matching `filter`, in storage order
    ///
    /// Either all matching rows are returned or an error; never a partial list.
    async fn fetch(&self, filter: &AudioFilter) -> Result<Vec<AudioEntry>, StoreError>;
}

/// SQLite-backed catalog
#[derive(Clone)]
pub struct SqliteAudioStore {
    pool: SqlitePool,
}

impl SqliteAudioStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AudioStore for SqliteAudioStore {
    async fn fetch(&self, filter: &AudioFilter) -> Result<Vec<AudioEntry>, StoreError> {
        let sql = format!("{} {}", SELECT_ENTRIES, filter.predicate);

        let mut query = sqlx::query_as::<_, AudioEntry>(&sql);
        for param in &filter.params {
            query = match param {
                SqlParam::Text(value) => query.bind(value.clone()),
                SqlParam::Integer(value) => query.bind(*value),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;

        tracing::debug!(
            predicate = %filter.predicate,
            rows = rows.len(),
            "Fetched catalog rows"
        );

        Ok(rows)
    }
}
