//! # Lexical tokens of a `.bib` file.
//!
//! | Kind               | Source text                                   |
//! |--------------------|-----------------------------------------------|
//! | `Start`            | `@`                                           |
//! | `Name`             | run of letters, digits, `- . _ : / \`, U+2014 |
//! | `StringTypeMarker` | a `Name` spelling `string` (any case)         |
//! | `QuotedString`     | `"..."`, brace-balanced interior              |
//! | `BracedString`     | `{...}` nested inside an entry                |
//! | `LeftBrace` ...    | structural `{ } ( ) , = #`                    |
//! | `Comment`          | `%` to end of line                            |
//! | `EndOfInput`       | emitted once after the last character         |
use std::fmt;

/// The closed set of token kinds produced by the [`Tokenizer`](crate::lexer::Tokenizer).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Start,
    Name,
    QuotedString,
    BracedString,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    Comma,
    Equal,
    Concatenation,
    Comment,
    StringTypeMarker,
    EndOfInput,
}

impl TokenKind {
    /// Literal text tokens, as opposed to names which may reference a string constant.
    pub fn is_literal(self) -> bool {
        matches!(self, Self::QuotedString | Self::BracedString)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "Start",
            Self::Name => "Name",
            Self::QuotedString => "QuotedString",
            Self::BracedString => "BracedString",
            Self::LeftBrace => "LeftBrace",
            Self::RightBrace => "RightBrace",
            Self::LeftParen => "LeftParen",
            Self::RightParen => "RightParen",
            Self::Comma => "Comma",
            Self::Equal => "Equal",
            Self::Concatenation => "Concatenation",
            Self::Comment => "Comment",
            Self::StringTypeMarker => "StringTypeMarker",
            Self::EndOfInput => "EndOfInput",
        };
        f.write_str(name)
    }
}

/// A 1-based line and column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Token text. Delimiters are stripped from quoted and braced strings; structural tokens
    /// carry their single character; `EndOfInput` is empty.
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            line: position.line,
            column: position.column,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_literal() {
        assert!(TokenKind::QuotedString.is_literal());
        assert!(TokenKind::BracedString.is_literal());
        assert!(!TokenKind::Name.is_literal());
        assert!(!TokenKind::StringTypeMarker.is_literal());
    }

    #[test]
    fn test_token_position() {
        let token = Token::new(TokenKind::Comma, ",", Position { line: 3, column: 7 });
        assert_eq!(token.position(), Position { line: 3, column: 7 });
        assert_eq!(token.kind.to_string(), "Comma");
    }
}
