use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub count: usize,
}

impl RankedEntry {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Counts verbatim values, keeping first-seen order.
pub(crate) fn count_by<'a>(values: impl Iterator<Item = &'a str>) -> Vec<RankedEntry> {
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut entries: Vec<RankedEntry> = Vec::new();

    for value in values {
        match positions.get(value) {
            Some(index) => entries[*index].count += 1,
            None => {
                positions.insert(value, entries.len());
                entries.push(RankedEntry::new(value, 1));
            }
        }
    }

    entries
}

/// Descending by count; the sort is stable so ties keep their incoming order.
pub(crate) fn ranked(mut entries: Vec<RankedEntry>) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

pub(crate) fn top_n(entries: Vec<RankedEntry>, limit: usize) -> Vec<RankedEntry> {
    let mut entries = ranked(entries);
    entries.truncate(limit);
    entries
}

/// Counts listings mentioning each dictionary key; a listing can hit many keys.
///
/// Zero-hit keys are dropped and hits are reported under the display label.
pub(crate) fn keyword_hits(
    search_texts: &[String],
    dictionary: &[(&str, &str)],
    limit: usize,
) -> Vec<RankedEntry> {
    let entries = dictionary
        .iter()
        .map(|(key, label)| {
            let hits = search_texts
                .iter()
                .filter(|text| text.contains(*key))
                .count();
            RankedEntry::new(*label, hits)
        })
        .filter(|entry| entry.count > 0)
        .collect();

    top_n(entries, limit)
}
