use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The character entry bodies are indented with.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhiteSpace {
    #[default]
    Tab,
    Space,
}

/// Layout options for writing.
///
/// With `align_tag_values`, padding is inserted between each tag name and its `=` so that the
/// equal signs line up: at tab stop `align_at_tab_stop` when indenting with tabs, or at column
/// `align_at_column` when indenting with spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteSettings {
    pub whitespace: WhiteSpace,
    /// Width of one indent level, and of a tab when counting columns.
    pub tab_size: usize,
    pub align_tag_values: bool,
    pub align_at_column: usize,
    pub align_at_tab_stop: usize,
    /// Omit the comma after the last tag of an entry.
    pub remove_last_comma: bool,
    pub new_line: String,
}

impl Default for WriteSettings {
    fn default() -> Self {
        Self {
            whitespace: WhiteSpace::Tab,
            tab_size: 4,
            align_tag_values: true,
            align_at_column: 24,
            align_at_tab_stop: 5,
            remove_last_comma: true,
            new_line: "\n".to_string(),
        }
    }
}

impl WriteSettings {
    pub fn validate(&self) -> Result<()> {
        if self.tab_size == 0 {
            return Err(Error::InvalidSettings("tab_size must be positive".into()));
        }
        if self.new_line.is_empty() {
            return Err(Error::InvalidSettings("new_line must not be empty".into()));
        }
        Ok(())
    }

    /// One level of indentation.
    pub fn indent(&self) -> Cow<'static, str> {
        match self.whitespace {
            WhiteSpace::Tab => Cow::Borrowed("\t"),
            WhiteSpace::Space => Cow::Owned(" ".repeat(self.tab_size)),
        }
    }

    /// Padding between `tag_name` and the following `=`.
    pub fn inter_tag_spacing(&self, tag_name: &str) -> Result<String> {
        if !self.align_tag_values {
            return Ok(" ".to_string());
        }

        let len = tag_name.chars().count();
        let (fill, budget, required) = match self.whitespace {
            // rounds down: a name shorter than one tab still ends before the next stop
            WhiteSpace::Tab => ("\t", self.align_at_tab_stop, 1 + len / self.tab_size),
            WhiteSpace::Space => (" ", self.align_at_column, 1 + len + self.tab_size),
        };

        match budget.checked_sub(required) {
            Some(count) => Ok(fill.repeat(count)),
            None => Err(Error::AlignmentOverflow {
                tag_name: tag_name.to_string(),
                width: budget,
            }),
        }
    }
}
