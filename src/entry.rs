//! The parts of a bibliography: entries and string constants.
use crate::error::Result;
use crate::naming::{NameFormat, first_author_name};
use crate::search::contains;
use crate::tags::{TagCase, TagMap};
use crate::template::EntryTemplates;
use crate::value::{TagValue, TagValueFormat};

/// A `@type{key, tag = value, ...}` record.
///
/// Setters return whether anything changed, and record the change in [`Entry::is_modified`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    entry_type: String,
    key: String,
    tags: TagMap,
    modified: bool,
}

impl Entry {
    pub fn new(entry_type: impl Into<String>) -> Self {
        Self::with_case(entry_type, TagCase::default())
    }

    pub fn with_case(entry_type: impl Into<String>, case: TagCase) -> Self {
        Self {
            entry_type: entry_type.into(),
            key: String::new(),
            tags: TagMap::new(case),
            modified: false,
        }
    }

    /// A new entry with the empty default tags of its type, in template order.
    pub fn from_template(entry_type: impl Into<String>, templates: &dyn EntryTemplates) -> Self {
        Self::from_template_with_case(entry_type, templates, TagCase::default())
    }

    pub(crate) fn from_template_with_case(
        entry_type: impl Into<String>,
        templates: &dyn EntryTemplates,
        case: TagCase,
    ) -> Self {
        let mut entry = Self::with_case(entry_type, case);
        let lookup = entry.entry_type.to_lowercase();
        for name in templates.default_tags(&lookup) {
            entry.tags.insert(name, TagValue::default());
        }
        entry
    }

    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }

    pub fn set_entry_type(&mut self, entry_type: impl Into<String>) -> bool {
        let entry_type = entry_type.into();
        if self.entry_type == entry_type {
            return false;
        }
        self.entry_type = entry_type;
        self.modified = true;
        true
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.key == key {
            return false;
        }
        self.key = key;
        self.modified = true;
        true
    }

    pub fn tags(&self) -> &TagMap {
        &self.tags
    }

    pub fn tag(&self, name: &str) -> Option<&TagValue> {
        self.tags.get(name)
    }

    /// The content of a tag, without delimiters.
    pub fn tag_content(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(|value| value.content.as_str())
    }

    pub fn tag_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.tags.names()
    }

    /// Set the content of a tag. An existing tag keeps its format; a new tag is bracketed.
    pub fn set_tag(&mut self, name: &str, content: impl Into<String>) -> bool {
        let format = self
            .tags
            .get(name)
            .map_or(TagValueFormat::Bracket, |value| value.format);
        self.set_tag_value(name, TagValue::new(content, format))
    }

    pub fn set_tag_value(&mut self, name: &str, value: TagValue) -> bool {
        if self.tags.get(name) == Some(&value) {
            return false;
        }
        self.tags.insert(name, value);
        self.modified = true;
        true
    }

    pub fn remove_tag(&mut self, name: &str) -> Option<TagValue> {
        let removed = self.tags.remove(name);
        if removed.is_some() {
            self.modified = true;
        }
        removed
    }

    /// Rename a tag, keeping its position. See [`TagMap::rename`].
    pub fn rename_tag(&mut self, old: &str, new: &str) -> Result<bool> {
        let renamed = self.tags.rename(old, new)?;
        self.modified |= renamed;
        Ok(renamed)
    }

    pub fn author(&self) -> Option<&str> {
        self.tag_content("author")
    }

    pub fn title(&self) -> Option<&str> {
        self.tag_content("title")
    }

    pub fn year(&self) -> Option<&str> {
        self.tag_content("year")
    }

    pub fn first_author_name(&self, format: NameFormat) -> String {
        first_author_name(self.author().unwrap_or_default(), format)
    }

    /// The name of the first tag whose content equals `value`.
    pub fn find_tag_by_value(&self, value: &str, case_sensitive: bool) -> Option<&str> {
        self.tags
            .iter()
            .find(|(_, tag)| {
                if case_sensitive {
                    tag.content == value
                } else {
                    tag.content.to_lowercase() == value.to_lowercase()
                }
            })
            .map(|(name, _)| name)
    }

    /// Whether any of `tag_names` contains `needle`.
    pub fn contains_text<S: AsRef<str>>(
        &self,
        tag_names: &[S],
        needle: &str,
        case_sensitive: bool,
    ) -> bool {
        tag_names.iter().any(|name| {
            self.tag_content(name.as_ref())
                .is_some_and(|content| contains(content, needle, case_sensitive))
        })
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub(crate) fn mark_saved(&mut self) {
        self.modified = false;
    }
}

/// The delimiters around the body of a `@string` declaration.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `@string(name = value)`
    #[default]
    Paren,
    /// `@string{name = value}`
    Brace,
}

impl Delimiter {
    pub fn open(self) -> char {
        match self {
            Self::Paren => '(',
            Self::Brace => '{',
        }
    }

    pub fn close(self) -> char {
        match self {
            Self::Paren => ')',
            Self::Brace => '}',
        }
    }
}

/// A `@string(name = value)` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringConstant {
    name: String,
    value: TagValue,
    delimiter: Delimiter,
    modified: bool,
}

impl StringConstant {
    pub fn new(name: impl Into<String>, value: TagValue) -> Self {
        Self {
            name: name.into(),
            value,
            delimiter: Delimiter::default(),
            modified: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &TagValue {
        &self.value
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.name == name {
            return false;
        }
        self.name = name;
        self.modified = true;
        true
    }

    /// Set the content, keeping the format.
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        let value = TagValue::new(content, self.value.format);
        self.set_value(value)
    }

    pub fn set_value(&mut self, value: TagValue) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.modified = true;
        true
    }

    pub fn set_delimiter(&mut self, delimiter: Delimiter) -> bool {
        if self.delimiter == delimiter {
            return false;
        }
        self.delimiter = delimiter;
        self.modified = true;
        true
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub(crate) fn mark_saved(&mut self) {
        self.modified = false;
    }
}

/// A completed top-level item, routed by [`Bibliography::add_part`](crate::Bibliography::add_part).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Entry(Entry),
    StringConstant(StringConstant),
}

impl From<Entry> for Part {
    fn from(entry: Entry) -> Self {
        Self::Entry(entry)
    }
}

impl From<StringConstant> for Part {
    fn from(constant: StringConstant) -> Self {
        Self::StringConstant(constant)
    }
}
