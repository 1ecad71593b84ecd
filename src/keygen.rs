//! Cite key generation.
//!
//! A generated key is `ref:` followed by the sanitized last name of the first author, the
//! `year` tag, and the first alphabetic suffix not already used by another entry:
//! `ref:menand2004a`, `ref:menand2004b`, ...
use tracing::debug;
use unicase::UniCase;

use crate::bibliography::Bibliography;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::naming::NameFormat;

pub const KEY_PREFIX: &str = "ref:";

/// Longest suffix tried before giving up.
pub const MAX_SUFFIX_LEN: usize = 2;

/// Alphabetic suffixes in order: `a` to `z`, then `aa` to `zz`, and so on up to a length limit.
#[derive(Debug, Clone)]
pub struct SuffixSequence {
    next: usize,
    max_len: usize,
}

impl SuffixSequence {
    pub fn new(max_len: usize) -> Self {
        Self { next: 0, max_len }
    }

    /// Total number of suffixes in one pass.
    pub fn capacity(&self) -> usize {
        (1..=self.max_len as u32).map(|len| 26usize.pow(len)).sum()
    }
}

impl Default for SuffixSequence {
    fn default() -> Self {
        Self::new(MAX_SUFFIX_LEN)
    }
}

impl Iterator for SuffixSequence {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next >= self.capacity() {
            return None;
        }
        // bijective base 26
        let mut n = self.next + 1;
        let mut letters = Vec::with_capacity(self.max_len);
        while n > 0 {
            n -= 1;
            letters.push(b'a' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        self.next += 1;
        Some(letters.into_iter().map(char::from).collect())
    }
}

/// The key of `entry` without its suffix.
pub fn key_base(entry: &Entry) -> String {
    let last_name: String = entry
        .first_author_name(NameFormat::Last)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    format!(
        "{KEY_PREFIX}{last_name}{}",
        entry.year().unwrap_or_default()
    )
}

impl Bibliography {
    /// Whether any entry has `key`, ignoring case.
    pub fn is_key_in_use(&self, key: &str) -> bool {
        let key = UniCase::new(key);
        self.entries()
            .iter()
            .any(|entry| UniCase::new(entry.key()) == key)
    }

    fn unique_key(&self, base: &str) -> Result<String> {
        SuffixSequence::default()
            .map(|suffix| format!("{base}{suffix}"))
            .find(|candidate| !self.is_key_in_use(candidate))
            .ok_or_else(|| Error::KeySpaceExhausted {
                base: base.to_string(),
            })
    }

    /// Give the entry at `index` a fresh generated key and return it.
    ///
    /// The entry's own current key counts as taken.
    pub fn generate_unique_key(&mut self, index: usize) -> Result<String> {
        let len = self.entries().len();
        let entry = self
            .entry(index)
            .ok_or(Error::EntryOutOfRange { index, len })?;
        let key = self.unique_key(&key_base(entry))?;
        debug!(index, key = %key, "generated cite key");
        self.entries_mut()[index].set_key(key.clone());
        Ok(key)
    }

    /// Give an entry which is not yet in the document a key unique within the document.
    pub fn generate_unique_key_for(&self, entry: &mut Entry) -> Result<String> {
        let key = self.unique_key(&key_base(entry))?;
        debug!(key = %key, "generated cite key");
        entry.set_key(key.clone());
        Ok(key)
    }

    /// Whether the key of `entry` starts with the base it would be generated with.
    pub fn has_valid_auto_key(&self, entry: &Entry) -> bool {
        entry.key().starts_with(&key_base(entry))
    }
}
