//! Lookup filter construction
//!
//! Turns (term, reading, sources) into a parameterized `WHERE` clause for the
//! `entries` table. Parameters are kept in placeholder order: term, then the
//! normalized reading (if any), then each source.

use yta_common::kana::katakana_to_hiragana;

/// Source filter value meaning "no source restriction"
pub const ALL_SOURCES: &str = "all";

/// A typed bind parameter for the catalog query
///
/// Lookup filters only bind text today; `Integer` covers numeric columns
/// such as `id` for hand-built filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

/// Predicate plus ordered parameters for one lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFilter {
    /// `WHERE ...` clause with `?` placeholders
    pub predicate: String,
    /// Bind values, one per placeholder, in order
    pub params: Vec<SqlParam>,
}

/// Whether `sources` restricts the lookup at all
///
/// An empty list and any list containing `"all"` are unrestricted.
pub fn restricts_sources(sources: &[String]) -> bool {
    !sources.is_empty() && !sources.iter().any(|s| s == ALL_SOURCES)
}

/// Build the lookup filter
///
/// - Always matches `expression = term`.
/// - A non-blank `reading` is folded to hiragana and broadens the match to
///   `expression = term OR reading = normalized`.
/// - A restricting `sources` list appends `AND source IN (...)`.
pub fn build_filter(term: &str, reading: &str, sources: &[String]) -> AudioFilter {
    let mut predicate = String::from("WHERE expression = ?");
    let mut params: Vec<SqlParam> = vec![term.into()];

    if !reading.trim().is_empty() {
        predicate = String::from("WHERE (expression = ? OR reading = ?)");
        params.push(katakana_to_hiragana(reading).into());
    }

    if restricts_sources(sources) {
        let placeholders = vec!["?"; sources.len()].join(", ");
        predicate.push_str(&format!(" AND source IN ({})", placeholders));
        params.extend(sources.iter().map(|s| SqlParam::from(s.as_str())));
    }

    AudioFilter { predicate, params }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SqlParam {
        SqlParam::Text(s.to_string())
    }

    fn sources(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_term_only() {
        let filter = build_filter("水", "", &[]);
        assert_eq!(filter.predicate, "WHERE expression = ?");
        assert_eq!(filter.params, vec![text("水")]);
    }

    #[test]
    fn test_whitespace_reading_ignored() {
        let filter = build_filter("水", "   ", &[]);
        assert_eq!(filter.predicate, "WHERE expression = ?");
        assert_eq!(filter.params.len(), 1);
    }

    #[test]
    fn test_reading_broadens_and_normalizes() {
        let filter = build_filter("学校", "ガッコウ", &[]);
        assert_eq!(filter.predicate, "WHERE (expression = ? OR reading = ?)");
        assert_eq!(filter.params, vec![text("学校"), text("がっこう")]);
    }

    #[test]
    fn test_sources_in_clause() {
        let filter = build_filter("猫", "", &sources(&["nhk16", "tts"]));
        assert_eq!(filter.predicate, "WHERE expression = ? AND source IN (?, ?)");
        assert_eq!(filter.params, vec![text("猫"), text("nhk16"), text("tts")]);
    }

    #[test]
    fn test_reading_and_sources_param_order() {
        let filter = build_filter("猫", "ネコ", &sources(&["forvo", "jpod", "taas"]));
        assert_eq!(
            filter.predicate,
            "WHERE (expression = ? OR reading = ?) AND source IN (?, ?, ?)"
        );
        assert_eq!(
            filter.params,
            vec![text("猫"), text("ねこ"), text("forvo"), text("jpod"), text("taas")]
        );
    }

    #[test]
    fn test_all_sentinel_is_unrestricted() {
        let only_all = build_filter("猫", "", &sources(&["all"]));
        let empty = build_filter("猫", "", &[]);
        assert_eq!(only_all, empty);

        let mixed = build_filter("猫", "", &sources(&["nhk16", "all"]));
        assert_eq!(mixed, empty);
    }
}
