//! Default tag sets for new entries.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Supplies the ordered default tag names for an entry type.
///
/// Implementations receive the entry type already lowercased and return an empty slice for
/// unknown types.
pub trait EntryTemplates {
    fn default_tags(&self, entry_type: &str) -> &[String];
}

/// No entry type has default tags.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoTemplates;

impl EntryTemplates for NoTemplates {
    fn default_tags(&self, _entry_type: &str) -> &[String] {
        &[]
    }
}

impl EntryTemplates for HashMap<String, Vec<String>> {
    fn default_tags(&self, entry_type: &str) -> &[String] {
        self.get(entry_type).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Entry types mapped onto named templates, so several types can share one tag list.
///
/// ```toml
/// [types]
/// article = "periodical"
/// inproceedings = "periodical"
///
/// [templates]
/// periodical = ["author", "title", "journal", "year"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateMap {
    pub types: HashMap<String, String>,
    pub templates: HashMap<String, Vec<String>>,
}

impl TemplateMap {
    pub fn insert(&mut self, entry_type: &str, template: &str, tags: Vec<String>) {
        self.types
            .insert(entry_type.to_lowercase(), template.to_string());
        self.templates.insert(template.to_string(), tags);
    }
}

impl EntryTemplates for TemplateMap {
    fn default_tags(&self, entry_type: &str) -> &[String] {
        self.types
            .get(entry_type)
            .and_then(|template| self.templates.get(template))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_map() {
        let templates: TemplateMap = toml::from_str(
            r#"
            [types]
            article = "periodical"
            book = "book"

            [templates]
            periodical = ["author", "title", "journal"]
            "#,
        )
        .unwrap();
        assert_eq!(
            templates.default_tags("article"),
            ["author", "title", "journal"]
        );
        assert!(templates.default_tags("book").is_empty());
        assert!(templates.default_tags("misc").is_empty());
    }

    #[test]
    fn test_hash_map() {
        let mut map = HashMap::new();
        map.insert("book".to_string(), vec!["title".to_string()]);
        assert_eq!(map.default_tags("book"), ["title"]);
        assert!(NoTemplates.default_tags("book").is_empty());
    }
}
