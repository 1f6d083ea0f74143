//! Audio lookup endpoints
//!
//! - `GET /api/audio`: ranked catalog entries as JSON
//! - `GET /api/audio/list`: the same ranking as a Yomitan custom audio source list

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use url::Url;
use yta_common::AudioEntry;

use crate::error::{ApiError, ApiResult};
use crate::lookup::{lookup_audio, AudioQuery};
use crate::AppState;

/// Query parameters shared by both lookup endpoints
#[derive(Debug, Deserialize)]
pub struct AudioParams {
    /// Expression to look up (required, non-blank)
    #[serde(default)]
    pub term: String,

    /// Reading, katakana or hiragana (optional)
    #[serde(default)]
    pub reading: String,

    /// Comma separated source list (optional, "all" = unrestricted)
    #[serde(default)]
    pub sources: Option<String>,
}

impl AudioParams {
    /// Validate and convert into a lookup query
    pub fn into_query(self) -> ApiResult<AudioQuery> {
        if self.term.trim().is_empty() {
            return Err(ApiError::BadRequest("Missing required parameter: term".to_string()));
        }

        let sources = parse_sources(self.sources.as_deref());
        Ok(AudioQuery::new(self.term, self.reading, sources))
    }
}

/// Split a comma separated source list, dropping blank items
pub fn parse_sources(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Lookup response
#[derive(Debug, Serialize)]
pub struct AudioLookupResponse {
    pub term: String,
    pub reading: String,
    pub total: usize,
    pub entries: Vec<AudioEntry>,
}

/// GET /api/audio?term=猫&reading=ねこ&sources=nhk16,forvo
///
/// Returns ranked entries; each `display` holds the entry's label.
pub async fn get_audio(
    State(state): State<AppState>,
    Query(params): Query<AudioParams>,
) -> ApiResult<Json<AudioLookupResponse>> {
    let query = params.into_query()?;
    let entries = lookup_audio(state.store.as_ref(), &query).await?;

    Ok(Json(AudioLookupResponse {
        term: query.term,
        reading: query.reading,
        total: entries.len(),
        entries,
    }))
}

/// One playable item in a Yomitan audio source list
#[derive(Debug, Serialize)]
pub struct AudioSourceItem {
    pub name: String,
    pub url: String,
}

/// Yomitan custom audio source response
#[derive(Debug, Serialize)]
pub struct AudioSourceList {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(rename = "audioSources")]
    pub audio_sources: Vec<AudioSourceItem>,
}

/// Parse the configured media base URL
pub fn parse_media_base(base_url: &str) -> ApiResult<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| ApiError::NotConfigured(format!("media_base_url is invalid: {}", e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::NotConfigured(format!(
            "media_base_url cannot hold a path: {}",
            base_url
        )));
    }
    Ok(url)
}

/// Clip URL `<base>/<source>/<file>` with each path segment percent-encoded
///
/// `/` inside `file` still separates segments.
pub fn clip_url(base: &Url, source: &str, file: &str) -> String {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(source).extend(file.split('/'));
    }
    url.to_string()
}

/// Build the Yomitan audio source list from ranked entries
pub fn to_audio_source_list(entries: Vec<AudioEntry>, base: &Url) -> AudioSourceList {
    let audio_sources = entries
        .into_iter()
        .map(|entry| AudioSourceItem {
            url: clip_url(base, &entry.source, &entry.file),
            name: entry.display.unwrap_or(entry.source),
        })
        .collect();

    AudioSourceList {
        kind: "audioSourceList",
        audio_sources,
    }
}

/// GET /api/audio/list?term=猫&reading=ねこ
///
/// Requires a valid `media_base_url`.
pub async fn get_audio_source_list(
    State(state): State<AppState>,
    Query(params): Query<AudioParams>,
) -> ApiResult<Json<AudioSourceList>> {
    let base_url = state
        .media_base_url
        .as_deref()
        .ok_or_else(|| ApiError::NotConfigured("media_base_url is not set".to_string()))?;
    let base = parse_media_base(base_url)?;

    let query = params.into_query()?;
    let entries = lookup_audio(state.store.as_ref(), &query).await?;

    Ok(Json(to_audio_source_list(entries, &base)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources() {
        assert!(parse_sources(None).is_empty());
        assert!(parse_sources(Some("")).is_empty());
        assert_eq!(
            parse_sources(Some("nhk16, forvo,,tts ")),
            vec!["nhk16", "forvo", "tts"]
        );
    }

    #[test]
    fn test_blank_term_rejected() {
        let params = AudioParams {
            term: "  ".to_string(),
            reading: String::new(),
            sources: None,
        };
        assert!(matches!(params.into_query(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_audio_source_list_urls() {
        let entries = vec![AudioEntry {
            expression: "猫".to_string(),
            reading: "ねこ".to_string(),
            source: "nhk16".to_string(),
            file: "neko.opus".to_string(),
            display: Some("nhk16 (Expression+Reading)".to_string()),
        }];

        let base = parse_media_base("https://media.example.org/audio/").unwrap();
        let list = to_audio_source_list(entries, &base);

        assert_eq!(list.kind, "audioSourceList");
        assert_eq!(list.audio_sources.len(), 1);
        assert_eq!(list.audio_sources[0].name, "nhk16 (Expression+Reading)");
        assert_eq!(
            list.audio_sources[0].url,
            "https://media.example.org/audio/nhk16/neko.opus"
        );
    }

    #[test]
    fn test_clip_url_encodes_segments() {
        let base = parse_media_base("https://media.example.org/audio").unwrap();

        assert_eq!(
            clip_url(&base, "forvo", "user a/猫 #1?.mp3"),
            "https://media.example.org/audio/forvo/user%20a/%E7%8C%AB%20%231%3F.mp3"
        );
    }

    #[test]
    fn test_clip_url_bare_host() {
        let base = parse_media_base("https://media.example.org").unwrap();
        assert_eq!(
            clip_url(&base, "nhk16", "neko.opus"),
            "https://media.example.org/nhk16/neko.opus"
        );
    }

    #[test]
    fn test_invalid_media_base_rejected() {
        assert!(matches!(
            parse_media_base("not a url"),
            Err(ApiError::NotConfigured(_))
        ));
        assert!(matches!(
            parse_media_base("mailto:clips@example.org"),
            Err(ApiError::NotConfigured(_))
        ));
    }
}
