//! An insertion-ordered tag map with case-normalized names.
use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::TagValue;

/// Whether tag names are compared case-insensitively.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCase {
    /// Names are lowercased on the way in, so `Title`, `title` and `TITLE` are one tag.
    #[default]
    Insensitive,
    Sensitive,
}

impl TagCase {
    pub fn normalize(self, name: &str) -> Cow<'_, str> {
        match self {
            Self::Insensitive => {
                let lower = name.to_lowercase();
                if lower == name {
                    Cow::Borrowed(name)
                } else {
                    Cow::Owned(lower)
                }
            }
            Self::Sensitive => Cow::Borrowed(name),
        }
    }
}

/// Tags in the order they were first inserted.
///
/// Replacing the value of an existing tag keeps its position; new tags are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    case: TagCase,
    tags: Vec<(String, TagValue)>,
    index: HashMap<String, usize>,
}

impl TagMap {
    pub fn new(case: TagCase) -> Self {
        Self {
            case,
            tags: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn case(&self) -> TagCase {
        self.case
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(self.case.normalize(name).as_ref()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.position(name).map(|pos| &self.tags[pos].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TagValue> {
        self.position(name).map(|pos| &mut self.tags[pos].1)
    }

    /// Insert or replace a tag, returning the previous value.
    pub fn insert(&mut self, name: &str, value: TagValue) -> Option<TagValue> {
        match self.position(name) {
            Some(pos) => Some(std::mem::replace(&mut self.tags[pos].1, value)),
            None => {
                let name = self.case.normalize(name).into_owned();
                self.index.insert(name.clone(), self.tags.len());
                self.tags.push((name, value));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<TagValue> {
        let pos = self.position(name)?;
        let (removed_name, value) = self.tags.remove(pos);
        self.index.remove(&removed_name);
        self.reindex_from(pos);
        Some(value)
    }

    /// Rename a tag in place.
    ///
    /// If `new` already exists it must be empty; it then receives the value of `old`, which is
    /// removed. Returns `false` if the two names normalize to the same tag.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<bool> {
        let Some(pos) = self.position(old) else {
            return Err(Error::MissingTag {
                name: old.to_string(),
            });
        };

        match self.position(new) {
            Some(target) if target == pos => Ok(false),
            Some(target) => {
                if !self.tags[target].1.is_empty() {
                    return Err(Error::TagExists {
                        name: self.tags[target].0.clone(),
                    });
                }
                let (old_name, value) = self.tags.remove(pos);
                self.index.remove(&old_name);
                let target = if target > pos { target - 1 } else { target };
                self.tags[target].1 = value;
                self.reindex_from(pos);
                Ok(true)
            }
            None => {
                let new_name = self.case.normalize(new).into_owned();
                let old_name = std::mem::replace(&mut self.tags[pos].0, new_name.clone());
                self.index.remove(&old_name);
                self.index.insert(new_name, pos);
                Ok(true)
            }
        }
    }

    pub fn clear(&mut self) {
        self.tags.clear();
        self.index.clear();
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &TagValue)> {
        self.tags.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.tags.iter().map(|(name, _)| name.as_str())
    }

    fn reindex_from(&mut self, start: usize) {
        for (pos, (name, _)) in self.tags.iter().enumerate().skip(start) {
            if let Some(slot) = self.index.get_mut(name) {
                *slot = pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(names: &[(&str, &str)]) -> TagMap {
        let mut map = TagMap::default();
        for (name, content) in names {
            map.insert(name, TagValue::bracketed(*content));
        }
        map
    }

    #[test]
    fn test_case_insensitive_access() {
        let mut tags = TagMap::default();
        tags.insert("Title", TagValue::bracketed("x"));
        assert_eq!(tags.get("title"), tags.get("TITLE"));
        assert_eq!(tags.get("Title").map(|v| v.content.as_str()), Some("x"));
        assert_eq!(tags.names().collect::<Vec<_>>(), vec!["title"]);
    }

    #[test]
    fn test_case_sensitive_access() {
        let mut tags = TagMap::new(TagCase::Sensitive);
        tags.insert("Name", TagValue::quoted("x"));
        assert!(tags.get("name").is_none());
        assert!(tags.get("Name").is_some());
    }

    #[test]
    fn test_replace_keeps_order() {
        let mut tags = map(&[("author", "A"), ("title", "T"), ("year", "2000")]);
        let old = tags.insert("TITLE", TagValue::quoted("U"));
        assert_eq!(old, Some(TagValue::bracketed("T")));
        assert_eq!(
            tags.names().collect::<Vec<_>>(),
            vec!["author", "title", "year"]
        );
    }

    #[test]
    fn test_remove_reindexes() {
        let mut tags = map(&[("author", "A"), ("title", "T"), ("year", "2000")]);
        assert!(tags.remove("author").is_some());
        assert_eq!(tags.position("year"), Some(1));
        assert_eq!(tags.get("year").unwrap().content, "2000");
        assert!(tags.remove("author").is_none());
    }

    #[test]
    fn test_rename_in_place() {
        let mut tags = map(&[("author", "A"), ("titel", "T"), ("year", "2000")]);
        assert!(tags.rename("titel", "Title").unwrap());
        assert_eq!(
            tags.names().collect::<Vec<_>>(),
            vec!["author", "title", "year"]
        );
        assert!(!tags.contains("titel"));
    }

    #[test]
    fn test_rename_merges_into_empty() {
        let mut tags = map(&[("title", ""), ("author", "A"), ("titel", "T")]);
        assert!(tags.rename("titel", "title").unwrap());
        assert_eq!(tags.names().collect::<Vec<_>>(), vec!["title", "author"]);
        assert_eq!(tags.get("title").unwrap().content, "T");
        assert_eq!(tags.position("author"), Some(1));
    }

    #[test]
    fn test_rename_errors() {
        let mut tags = map(&[("title", "T"), ("titel", "U")]);
        assert!(matches!(
            tags.rename("titel", "title"),
            Err(Error::TagExists { .. })
        ));
        assert!(matches!(
            tags.rename("missing", "x"),
            Err(Error::MissingTag { .. })
        ));
        assert!(!tags.rename("title", "TITLE").unwrap());
    }
}
