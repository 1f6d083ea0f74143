//! Audio lookup pipeline
//!
//! filter → fetch → label → rank. Each stage is a plain function over
//! request-local data; only the fetch touches storage.

pub mod filter;
pub mod labels;
pub mod rank;
pub mod store;

use tracing::{debug, error};
use yta_common::AudioEntry;

use crate::error::LookupError;
use filter::build_filter;
use labels::generate_labels;
use rank::sort_results;
use store::AudioStore;

/// One lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioQuery {
    /// Expression to match exactly
    pub term: String,
    /// Reading as supplied by the caller; may be empty
    pub reading: String,
    /// Allowed sources; empty or containing "all" means unrestricted
    pub sources: Vec<String>,
}

impl AudioQuery {
    pub fn new(term: impl Into<String>, reading: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            term: term.into(),
            reading: reading.into(),
            sources,
        }
    }
}

/// Look up, label and rank audio entries for a query
///
/// Returned entries carry their label in `display`. A store failure is logged
/// with the query context and returned as [`LookupError::StorageFailure`].
pub async fn lookup_audio(
    store: &dyn AudioStore,
    query: &AudioQuery,
) -> Result<Vec<AudioEntry>, LookupError> {
    let filter = build_filter(&query.term, &query.reading, &query.sources);

    let candidates = match store.fetch(&filter).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(
                term = %query.term,
                reading = %query.reading,
                error = %e,
                "Database query failed"
            );
            return Err(LookupError::StorageFailure {
                term: query.term.clone(),
                reading: query.reading.clone(),
                source: e,
            });
        }
    };

    let labels = generate_labels(&candidates, &query.term, &query.reading);
    let ranked = sort_results(&candidates, &labels);

    debug!(
        term = %query.term,
        reading = %query.reading,
        candidates = ranked.len(),
        "Audio lookup complete"
    );

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use filter::{AudioFilter, SqlParam};
    use std::sync::Mutex;
    use store::StoreError;

    /// Returns fixed rows and remembers the filter it was asked for
    struct FixedStore {
        rows: Vec<AudioEntry>,
        seen: Mutex<Option<AudioFilter>>,
    }

    impl FixedStore {
        fn new(rows: Vec<AudioEntry>) -> Self {
            Self {
                rows,
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl AudioStore for FixedStore {
        async fn fetch(&self, filter: &AudioFilter) -> Result<Vec<AudioEntry>, StoreError> {
            *self.seen.lock().unwrap() = Some(filter.clone());
            Ok(self.rows.clone())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl AudioStore for FailingStore {
        async fn fetch(&self, _filter: &AudioFilter) -> Result<Vec<AudioEntry>, StoreError> {
            Err(StoreError::Unavailable("disk I/O error".to_string()))
        }
    }

    fn entry(expression: &str, reading: &str, source: &str, display: Option<&str>) -> AudioEntry {
        AudioEntry {
            expression: expression.to_string(),
            reading: reading.to_string(),
            source: source.to_string(),
            file: format!("{}.mp3", source),
            display: display.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_lookup_labels_and_ranks() {
        let store = FixedStore::new(vec![
            entry("猫", "ねこ", "tts", None),
            entry("ネコ", "ねこ", "nhk16", None),
            entry("猫", "ねこ", "forvo", Some("cat")),
        ]);
        let query = AudioQuery::new("猫", "ねこ", vec![]);

        let results = lookup_audio(&store, &query).await.unwrap();

        let labels: Vec<&str> = results
            .iter()
            .map(|e| e.display.as_deref().unwrap())
            .collect();
        assert_eq!(
            labels,
            vec![
                "forvo: cat (Expression+Reading)",
                "tts (Expression+Reading)",
                "nhk16 (Only Reading)",
            ]
        );
    }

    #[tokio::test]
    async fn test_lookup_passes_normalized_filter() {
        let store = FixedStore::new(vec![]);
        let query = AudioQuery::new("学校", "ガッコウ", vec!["nhk16".to_string()]);

        let results = lookup_audio(&store, &query).await.unwrap();
        assert!(results.is_empty());

        let seen = store.seen.lock().unwrap().clone().unwrap();
        assert_eq!(
            seen.params,
            vec![
                SqlParam::Text("学校".to_string()),
                SqlParam::Text("がっこう".to_string()),
                SqlParam::Text("nhk16".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_storage_failure_carries_context() {
        let query = AudioQuery::new("水", "", vec![]);

        let err = lookup_audio(&FailingStore, &query).await.unwrap_err();

        match err {
            LookupError::StorageFailure { term, reading, source } => {
                assert_eq!(term, "水");
                assert_eq!(reading, "");
                assert!(matches!(source, StoreError::Unavailable(_)));
            }
        }
    }
}
