//! Candidate ranking
//!
//! Orders candidates by match type first, then by a fixed source preference.
//! The sort is stable: candidates with equal keys keep their fetch order.

use yta_common::AudioEntry;

use super::labels::{Label, MatchType};

/// Source preference, most preferred first
pub const SOURCE_PRIORITY: [(&str, u32); 10] = [
    ("nhk16", 0),
    ("daijisen", 1),
    ("shinmeikai8", 2),
    ("jpod", 3),
    ("taas", 4),
    ("ozk5", 5),
    ("forvo", 6),
    ("forvo_ext", 7),
    ("forvo_ext2", 8),
    ("tts", 9),
];

/// Priority assigned to sources missing from [`SOURCE_PRIORITY`]
pub const UNKNOWN_SOURCE_PRIORITY: u32 = u32::MAX;

/// Priority of a source, lower sorts first
pub fn source_priority(source: &str) -> u32 {
    SOURCE_PRIORITY
        .iter()
        .find(|(name, _)| *name == source)
        .map(|(_, priority)| *priority)
        .unwrap_or(UNKNOWN_SOURCE_PRIORITY)
}

/// An entry paired with the label it was given, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub entry: AudioEntry,
    pub label: Option<Label>,
}

impl RankedEntry {
    fn match_priority(&self) -> u8 {
        self.label
            .as_ref()
            .map(|l| l.match_type)
            .unwrap_or(MatchType::Unmatched)
            .priority()
    }

    fn sort_key(&self) -> (u8, u32) {
        (self.match_priority(), source_priority(&self.entry.source))
    }
}

/// Pair entries with their labels by index and sort
///
/// `labels[i]` belongs to `entries[i]`. An entry without a label ranks as
/// unmatched. Inputs are not modified.
pub fn rank(entries: &[AudioEntry], labels: &[Label]) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| RankedEntry {
            entry: entry.clone(),
            label: labels.get(index).cloned(),
        })
        .collect();

    // sort_by_key is stable
    ranked.sort_by_key(RankedEntry::sort_key);
    ranked
}

/// Sort entries for presentation, replacing each `display` with its label text
///
/// Entries without a label end up with `display == None`.
pub fn sort_results(entries: &[AudioEntry], labels: &[Label]) -> Vec<AudioEntry> {
    rank(entries, labels)
        .into_iter()
        .map(|ranked| {
            let mut entry = ranked.entry;
            entry.display = ranked.label.map(|l| l.text);
            entry
        })
        .collect()
}
