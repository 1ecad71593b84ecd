//! Searching and ordering entries.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::naming::NameFormat;

/// The order of [`sort`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Lowercased last name of the first author.
    #[default]
    Author,
    /// The cite key as written.
    Key,
}

impl SortBy {
    fn sort_key(self, entry: &Entry) -> String {
        match self {
            Self::Author => entry.first_author_name(NameFormat::Last).to_lowercase(),
            Self::Key => entry.key().to_string(),
        }
    }

    pub fn compare(self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            Self::Author => self.sort_key(a).cmp(&self.sort_key(b)),
            Self::Key => a.key().cmp(b.key()),
        }
    }
}

/// Substring test, case-insensitive unless `case_sensitive`.
pub fn contains(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        haystack.contains(needle)
    } else {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Entries whose key (if `include_key`) or any of `tag_names` contains `needle`.
pub fn search<'e, S: AsRef<str>>(
    entries: &'e [Entry],
    tag_names: &[S],
    include_key: bool,
    needle: &str,
    case_sensitive: bool,
) -> Vec<&'e Entry> {
    entries
        .iter()
        .filter(|entry| {
            (include_key && contains(entry.key(), needle, case_sensitive))
                || entry.contains_text(tag_names, needle, case_sensitive)
        })
        .collect()
}

/// Stable ascending sort.
pub fn sort(entries: &mut [Entry], by: SortBy) {
    match by {
        // the derived name is computed once per entry
        SortBy::Author => entries.sort_by_cached_key(|entry| by.sort_key(entry)),
        SortBy::Key => entries.sort_by(|a, b| a.key().cmp(b.key())),
    }
}

/// Where `entry` would be inserted into `entries`, already sorted by `by`, to keep it sorted.
///
/// Equal elements stay before the returned index.
pub fn find_insert_index(entries: &[Entry], entry: &Entry, by: SortBy) -> usize {
    entries.partition_point(|probe| by.compare(probe, entry) != Ordering::Greater)
}
