//! Database models

use serde::{Deserialize, Serialize};

/// One row of the audio catalog: a playable clip identified by
/// expression, reading and source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AudioEntry {
    /// Written form of the word
    pub expression: String,
    /// Pronunciation, stored in hiragana
    pub reading: String,
    /// Provider identifier (e.g. "nhk16", "forvo")
    pub source: String,
    /// Opaque storage reference for the clip
    pub file: String,
    /// Optional free-text descriptor; replaced by the ranked label in lookup results
    pub display: Option<String>,
}
