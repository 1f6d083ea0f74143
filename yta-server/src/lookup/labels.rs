//! Display labels for lookup candidates
//!
//! Each candidate gets a label `"<source>[: <display>][ (<match>)]"` and an
//! explicit [`MatchType`] tag. The ranker orders by the tag, never by
//! inspecting label text.

use yta_common::AudioEntry;

/// How a candidate matched the requested term and reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// Both expression and reading equal the query
    ExpressionReading,
    /// Only the expression equals the query term
    ExpressionOnly,
    /// Only the reading equals the query reading
    ReadingOnly,
    /// Neither matched exactly
    Unmatched,
}

impl MatchType {
    /// Classify an entry against the query term and reading
    pub fn classify(term: &str, reading: &str, entry: &AudioEntry) -> Self {
        let expression_match = term == entry.expression;
        let reading_match = reading == entry.reading;

        match (expression_match, reading_match) {
            (true, true) => MatchType::ExpressionReading,
            (true, false) => MatchType::ExpressionOnly,
            (false, true) => MatchType::ReadingOnly,
            (false, false) => MatchType::Unmatched,
        }
    }

    /// Ranking priority, lower sorts first
    pub fn priority(self) -> u8 {
        match self {
            MatchType::ExpressionReading => 0,
            MatchType::ExpressionOnly => 1,
            MatchType::ReadingOnly => 2,
            MatchType::Unmatched => 3,
        }
    }

    /// Parenthesized annotation text, if any
    pub fn annotation(self) -> Option<&'static str> {
        match self {
            MatchType::ExpressionReading => Some("Expression+Reading"),
            MatchType::ExpressionOnly => Some("Only Expression"),
            MatchType::ReadingOnly => Some("Only Reading"),
            MatchType::Unmatched => None,
        }
    }
}

/// A candidate's display label and the match type it encodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub match_type: MatchType,
}

/// Build the label for one entry
pub fn label_for(entry: &AudioEntry, term: &str, reading: &str) -> Label {
    let match_type = MatchType::classify(term, reading, entry);

    let mut text = entry.source.clone();
    if let Some(display) = entry.display.as_deref().filter(|d| !d.is_empty()) {
        text.push_str(": ");
        text.push_str(display);
    }
    if let Some(annotation) = match_type.annotation() {
        text.push_str(" (");
        text.push_str(annotation);
        text.push(')');
    }

    Label { text, match_type }
}

/// Build one label per entry, in entry order
///
/// `term` and `reading` are the caller-supplied values; the reading is
/// compared as given, without kana normalization.
pub fn generate_labels(entries: &[AudioEntry], term: &str, reading: &str) -> Vec<Label> {
    entries
        .iter()
        .map(|entry| label_for(entry, term, reading))
        .collect()
}
