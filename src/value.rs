use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexer::is_name_char;

/// How a tag value is delimited when it is written.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagValueFormat {
    /// `{content}`
    #[default]
    Bracket,
    /// `"content"`
    Quote,
    /// `content`, for numbers and references to string constants.
    None,
}

/// The content of a tag together with the delimiters it is written with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TagValue {
    pub content: String,
    pub format: TagValueFormat,
}

impl TagValue {
    pub fn new(content: impl Into<String>, format: TagValueFormat) -> Self {
        Self {
            content: content.into(),
            format,
        }
    }

    pub fn bracketed(content: impl Into<String>) -> Self {
        Self::new(content, TagValueFormat::Bracket)
    }

    pub fn quoted(content: impl Into<String>) -> Self {
        Self::new(content, TagValueFormat::Quote)
    }

    pub fn bare(content: impl Into<String>) -> Self {
        Self::new(content, TagValueFormat::None)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The format the content is actually written with.
    ///
    /// Falls back to `Bracket` when the stored format would not read back as one token: bare
    /// content that is not a single name, or quoted content that would close the quotes early.
    pub fn written_format(&self) -> TagValueFormat {
        match self.format {
            TagValueFormat::None if !is_bare_name(&self.content) => TagValueFormat::Bracket,
            TagValueFormat::Quote if !fits_in_quotes(&self.content) => TagValueFormat::Bracket,
            format => format,
        }
    }

    /// Render the content with `format` instead of the stored one.
    pub fn render_as(&self, format: TagValueFormat) -> String {
        Rendered {
            content: &self.content,
            format,
        }
        .to_string()
    }
}

impl From<&str> for TagValue {
    fn from(content: &str) -> Self {
        Self::bracketed(content)
    }
}

impl From<String> for TagValue {
    fn from(content: String) -> Self {
        Self::bracketed(content)
    }
}

struct Rendered<'a> {
    content: &'a str,
    format: TagValueFormat,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            TagValueFormat::Bracket => write!(f, "{{{}}}", self.content),
            TagValueFormat::Quote => write!(f, "\"{}\"", self.content),
            TagValueFormat::None => f.write_str(self.content),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rendered {
            content: &self.content,
            format: self.written_format(),
        }
        .fmt(f)
    }
}

fn is_bare_name(content: &str) -> bool {
    !content.is_empty() && content.chars().all(is_name_char)
}

/// Whether `"content"` ends at the closing quote and nowhere before.
fn fits_in_quotes(content: &str) -> bool {
    let mut depth: i64 = 0;
    let mut escaped = false;
    for c in content.chars() {
        match c {
            '"' if depth <= 0 && !escaped => return false,
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        escaped = c == '\\' && !escaped;
    }
    !escaped
}
