//! The lexical tokenizer.
//!
//! [`Tokenizer`] is a pull-based iterator: the underlying [`Read`] is advanced only when the next
//! token is requested, and the whole input is consumed in a single forward pass.
use std::iter::FusedIterator;

use unicase::UniCase;

use crate::error::{Error, Result};
use crate::read::Read;
use crate::token::{Position, Token, TokenKind};

/// Characters which begin a comment running to the end of the line.
pub const DEFAULT_COMMENT_CHARS: &[char] = &['%'];

/// Characters, besides letters and digits, which may appear in a `Name` token.
const NAME_PUNCTUATION: &[char] = &['-', '.', '_', '\u{2014}', ':', '/', '\\'];

#[inline]
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || NAME_PUNCTUATION.contains(&c)
}

pub struct Tokenizer<R> {
    reader: R,
    comment_chars: Vec<char>,
    line: usize,
    /// Characters consumed on the current line.
    column: usize,
    brace_depth: i64,
    paren_depth: i64,
    done: bool,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self::with_comment_chars(reader, DEFAULT_COMMENT_CHARS)
    }

    pub fn with_comment_chars(reader: R, comment_chars: impl Into<Vec<char>>) -> Self {
        Self {
            reader,
            comment_chars: comment_chars.into(),
            line: 1,
            column: 0,
            brace_depth: 0,
            paren_depth: 0,
            done: false,
        }
    }

    /// Position of the next unconsumed character.
    pub fn current_position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column + 1,
        }
    }

    /// Consume `c`, which must be the character last returned by `peek`.
    #[inline]
    fn bump(&mut self, c: char) {
        self.reader.discard();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn single(&mut self, kind: TokenKind, c: char, start: Position) -> Token {
        self.bump(c);
        Token::new(kind, c, start)
    }

    fn next_token(&mut self) -> Result<Token> {
        loop {
            let start = self.current_position();
            let Some(c) = self.reader.peek()? else {
                return Ok(Token::new(TokenKind::EndOfInput, "", start));
            };

            if self.comment_chars.contains(&c) {
                return self.comment(start);
            }

            if is_name_char(c) {
                return self.name(start);
            }

            let token = match c {
                '@' => self.single(TokenKind::Start, c, start),
                '"' => return self.quoted(start),
                '{' if self.brace_depth == 0 && self.paren_depth == 0 => {
                    self.brace_depth += 1;
                    self.single(TokenKind::LeftBrace, c, start)
                }
                '{' => return self.braced(start),
                '}' => {
                    self.brace_depth -= 1;
                    self.single(TokenKind::RightBrace, c, start)
                }
                '(' => {
                    self.paren_depth += 1;
                    self.single(TokenKind::LeftParen, c, start)
                }
                ')' => {
                    self.paren_depth -= 1;
                    self.single(TokenKind::RightParen, c, start)
                }
                ',' => self.single(TokenKind::Comma, c, start),
                '#' => self.single(TokenKind::Concatenation, c, start),
                '=' => self.single(TokenKind::Equal, c, start),
                c if c.is_whitespace() => {
                    self.bump(c);
                    continue;
                }
                character => {
                    return Err(Error::Lexical {
                        line: start.line,
                        column: start.column,
                        character,
                    });
                }
            };
            return Ok(token);
        }
    }

    /// The comment text is the whole line, comment character included, without the line break.
    fn comment(&mut self, start: Position) -> Result<Token> {
        let line = self.reader.take_line()?;
        self.column += line.chars().count();
        let text = line.strip_suffix('\r').unwrap_or(&line);
        Ok(Token::new(TokenKind::Comment, text, start))
    }

    fn name(&mut self, start: Position) -> Result<Token> {
        let mut text = String::new();
        while let Some(c) = self.reader.peek()? {
            if !is_name_char(c) {
                break;
            }
            self.bump(c);
            text.push(c);
        }

        let kind = if UniCase::unicode(text.trim()) == UniCase::ascii("string") {
            TokenKind::StringTypeMarker
        } else {
            TokenKind::Name
        };
        Ok(Token::new(kind, text, start))
    }

    /// Read `"..."`. A `"` only terminates the token outside of braces and when it is not
    /// escaped by a backslash.
    fn quoted(&mut self, start: Position) -> Result<Token> {
        self.bump('"');
        let mut text = String::new();
        let mut depth: i64 = 0;
        let mut escaped = false;

        while let Some(c) = self.reader.peek()? {
            if c == '"' && depth <= 0 && !escaped {
                self.bump(c);
                break;
            }
            self.bump(c);
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            escaped = c == '\\' && !escaped;
            text.push(c);
        }
        Ok(Token::new(TokenKind::QuotedString, text, start))
    }

    /// Read a balanced `{...}` and return the text between the outermost braces.
    fn braced(&mut self, start: Position) -> Result<Token> {
        self.bump('{');
        let mut text = String::new();
        let mut depth: usize = 1;

        while let Some(c) = self.reader.peek()? {
            self.bump(c);
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            text.push(c);
        }
        Ok(Token::new(TokenKind::BracedString, text, start))
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        if !matches!(&result, Ok(token) if token.kind != TokenKind::EndOfInput) {
            self.done = true;
        }
        Some(result)
    }
}

impl<R: Read> FusedIterator for Tokenizer<R> {}
