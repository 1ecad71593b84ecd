use std::fmt;

use thiserror::Error;

use crate::token::TokenKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way reading, editing, or writing a bibliography can fail.
///
/// None of these are recovered from internally: each aborts the enclosing parse, write, key
/// generation, or rename.
#[derive(Debug, Error)]
pub enum Error {
    /// An input character matched no token rule.
    #[error("unrecognized character '{character}' at line {line}, column {column}")]
    Lexical {
        line: usize,
        column: usize,
        character: char,
    },

    /// A token arrived in a parser state with no transition for it. End of input is reported
    /// as [`TokenKind::EndOfInput`].
    #[error(
        "unexpected token {found} at line {line}, column {column}; expected one of: {}",
        ExpectedKinds(.expected)
    )]
    UnexpectedToken {
        line: usize,
        column: usize,
        found: TokenKind,
        expected: Vec<TokenKind>,
    },

    /// A tag name does not fit in the configured alignment width.
    #[error("tag name '{tag_name}' is too long to align at {width}")]
    AlignmentOverflow { tag_name: String, width: usize },

    /// Every disambiguating suffix is already taken for this key base.
    #[error("ran out of cite key suffixes for '{base}'")]
    KeySpaceExhausted { base: String },

    /// Renaming would overwrite a tag that already holds content.
    #[error("tag '{name}' already exists")]
    TagExists { name: String },

    /// The tag to rename does not exist.
    #[error("no tag named '{name}'")]
    MissingTag { name: String },

    #[error("no entry at index {index}; the bibliography has {len}")]
    EntryOutOfRange { index: usize, len: usize },

    #[error("invalid write settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn unexpected(
        line: usize,
        column: usize,
        found: TokenKind,
        expected: Vec<TokenKind>,
    ) -> Self {
        Self::UnexpectedToken {
            line,
            column,
            found,
            expected,
        }
    }

    /// The `(line, column)` the error points at, if it came from parsing.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Lexical { line, column, .. } | Self::UnexpectedToken { line, column, .. } => {
                Some((*line, *column))
            }
            _ => None,
        }
    }
}

struct ExpectedKinds<'a>(&'a [TokenKind]);

impl fmt::Display for ExpectedKinds<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds = self.0.iter();
        if let Some(first) = kinds.next() {
            write!(f, "{first}")?;
            for kind in kinds {
                write!(f, ", {kind}")?;
            }
        }
        Ok(())
    }
}
