//! Extracting the first author from an `author` field.
use serde::{Deserialize, Serialize};

/// Trailing name words which are never taken as the last name.
pub const NAME_SUFFIXES: &[&str] = &[
    "jr", "jr.", "sr", "sr.", "ii", "iii", "iv", "v", "p\\`{e}re", "fils",
];

/// The part of an author's name to return.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameFormat {
    /// The first word of the name.
    First,
    /// The whole name, in `First Last` order.
    Full,
    /// The last word which is not a suffix such as `jr.`.
    #[default]
    Last,
}

/// The first author of an `author` field in `First Last` order, if there is one.
///
/// Authors are separated by the word `and`; a name containing a comma is read as
/// `Last, First`.
pub fn first_author(field: &str) -> Option<String> {
    let field = field.trim_start_matches('{').trim_end_matches('}');

    let mut words = Vec::new();
    for word in field.split_whitespace() {
        if word == "and" {
            if words.is_empty() {
                continue;
            }
            break;
        }
        words.push(word);
    }
    if words.is_empty() {
        return None;
    }
    let author = words.join(" ");

    let parts: Vec<&str> = author
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    match parts.as_slice() {
        [] => None,
        [name] => Some((*name).to_string()),
        [last, first, ..] => Some(format!("{first} {last}")),
    }
}

/// The last name of a `First Last` name.
pub fn last_name(full_name: &str) -> &str {
    full_name
        .split_whitespace()
        .rev()
        .find(|word| !NAME_SUFFIXES.contains(word))
        .unwrap_or_default()
}

/// The requested part of the first author's name, or an empty string.
pub fn first_author_name(field: &str, format: NameFormat) -> String {
    let Some(full_name) = first_author(field) else {
        return String::new();
    };
    match format {
        NameFormat::Full => full_name,
        NameFormat::First => full_name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string(),
        NameFormat::Last => last_name(&full_name).to_string(),
    }
}
