//! The table-driven parser.
mod table;

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use unicase::UniCase;

pub use self::table::{BuilderAction, ParserState, TRANSITIONS, expected, transition};
use crate::bibliography::Bibliography;
use crate::entry::{Delimiter, Entry, Part, StringConstant};
use crate::error::{Error, Result};
use crate::lexer::{DEFAULT_COMMENT_CHARS, Tokenizer};
use crate::read::{IoReader, Read, StrReader};
use crate::tags::TagCase;
use crate::template::{EntryTemplates, NoTemplates};
use crate::token::{Token, TokenKind};
use crate::value::{TagValue, TagValueFormat};

/// Options which change how input is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSettings {
    /// Tag name matching inside entries.
    pub entry_tag_case: TagCase,
    /// Name matching of `@string` constants.
    pub string_name_case: TagCase,
    /// Characters which start a line comment.
    pub comment_chars: Vec<char>,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            entry_tag_case: TagCase::Insensitive,
            string_name_case: TagCase::Sensitive,
            comment_chars: DEFAULT_COMMENT_CHARS.to_vec(),
        }
    }
}

/// Reads whole documents.
///
/// A parse either returns the complete [`Bibliography`] or the first error; nothing read before
/// the error is kept.
pub struct Parser<'t> {
    templates: &'t dyn EntryTemplates,
    settings: ParseSettings,
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<'static> {
    pub fn new() -> Self {
        Self {
            templates: &NoTemplates,
            settings: ParseSettings::default(),
        }
    }
}

impl<'t> Parser<'t> {
    /// New entries start with the default tags from `templates`.
    pub fn with_templates(templates: &'t dyn EntryTemplates) -> Self {
        Self {
            templates,
            settings: ParseSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ParseSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ParseSettings {
        &self.settings
    }

    pub fn parse_str(&self, input: &str) -> Result<Bibliography> {
        self.parse(StrReader::new(input))
    }

    /// Parse from a buffered stream, which is dropped when this returns.
    pub fn parse_reader<B: BufRead>(&self, reader: B) -> Result<Bibliography> {
        self.parse(IoReader::new(reader))
    }

    pub fn parse<R: Read>(&self, reader: R) -> Result<Bibliography> {
        let tokens = Tokenizer::with_comment_chars(reader, self.settings.comment_chars.clone());
        let mut builder = Builder::new(self.templates, &self.settings);
        let mut state = ParserState::Begin;

        for token in tokens {
            let token = token?;
            let Some((next, action)) = transition(state, token.kind) else {
                return Err(Error::unexpected(
                    token.line,
                    token.column,
                    token.kind,
                    expected(state),
                ));
            };
            trace!(?state, ?next, ?action, kind = %token.kind, line = token.line, "transition");
            builder.apply(action, token);
            state = next;
        }

        let mut bibliography = builder.finish();
        bibliography.mark_saved();
        Ok(bibliography)
    }
}

enum Pending {
    Entry(Entry),
    StringConstant(Option<StringConstant>),
}

/// Assembles parts from the actions of the transition table.
struct Builder<'p> {
    templates: &'p dyn EntryTemplates,
    settings: &'p ParseSettings,
    bibliography: Bibliography,
    part: Option<Pending>,
    tag_name: String,
    tag_value: String,
    /// `None` until the first value token. Any literal segment makes the whole value `Bracket`.
    tag_format: Option<TagValueFormat>,
}

impl<'p> Builder<'p> {
    fn new(templates: &'p dyn EntryTemplates, settings: &'p ParseSettings) -> Self {
        Self {
            templates,
            settings,
            bibliography: Bibliography::new(),
            part: None,
            tag_name: String::new(),
            tag_value: String::new(),
            tag_format: None,
        }
    }

    fn apply(&mut self, action: BuilderAction, token: Token) {
        match action {
            BuilderAction::SetHeader => self.bibliography.add_header_line(token.text),
            BuilderAction::SetType => self.start_part(&token.text),
            BuilderAction::SetKey => {
                if let Some(Pending::Entry(entry)) = &mut self.part {
                    entry.set_key(token.text);
                }
            }
            BuilderAction::SetTagName => self.tag_name = token.text,
            BuilderAction::SetTagValue => {
                self.tag_value.push_str(&token.text);
                self.tag_format = match (self.tag_format, token.kind.is_literal()) {
                    (_, true) | (Some(TagValueFormat::Bracket), false) => {
                        Some(TagValueFormat::Bracket)
                    }
                    _ => Some(TagValueFormat::None),
                };
            }
            BuilderAction::SetTag => self.commit_tag(),
            BuilderAction::Build => {
                self.commit_tag();
                self.build(token.kind);
            }
            BuilderAction::Skip => {}
        }
    }

    fn start_part(&mut self, entry_type: &str) {
        let part = if UniCase::unicode(entry_type) == UniCase::ascii("string") {
            Pending::StringConstant(None)
        } else {
            Pending::Entry(Entry::from_template_with_case(
                entry_type,
                self.templates,
                self.settings.entry_tag_case,
            ))
        };
        self.part = Some(part);
    }

    fn commit_tag(&mut self) {
        let name = std::mem::take(&mut self.tag_name);
        let content = std::mem::take(&mut self.tag_value);
        let format = self.tag_format.take().unwrap_or_default();
        if name.is_empty() {
            return;
        }

        match &mut self.part {
            Some(Pending::Entry(entry)) => {
                entry.set_tag_value(&name, TagValue::new(content, format));
            }
            Some(Pending::StringConstant(constant)) => {
                let name = self.settings.string_name_case.normalize(&name);
                if let Some(previous) = constant {
                    warn!(
                        previous = previous.name(),
                        name = %name,
                        "string constant declares more than one tag; keeping the last"
                    );
                }
                *constant = Some(StringConstant::new(name, TagValue::quoted(content)));
            }
            None => {}
        }
    }

    fn build(&mut self, closing: TokenKind) {
        match self.part.take() {
            Some(Pending::Entry(entry)) => {
                debug!(
                    entry_type = entry.entry_type(),
                    key = entry.key(),
                    tags = entry.tags().len(),
                    "built entry"
                );
                self.bibliography.add_part(Part::Entry(entry));
            }
            Some(Pending::StringConstant(Some(mut constant))) => {
                if closing == TokenKind::RightBrace {
                    constant.set_delimiter(Delimiter::Brace);
                }
                debug!(name = constant.name(), "built string constant");
                self.bibliography.add_part(Part::StringConstant(constant));
            }
            Some(Pending::StringConstant(None)) => debug!("skipped empty string constant"),
            None => {}
        }
    }

    fn finish(self) -> Bibliography {
        self.bibliography
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(input: &str) -> Bibliography {
        Parser::new().parse_str(input).unwrap()
    }

    fn content<'b>(bib: &'b Bibliography, name: &str) -> &'b str {
        bib.entry(0).unwrap().tag_content(name).unwrap()
    }

    #[test]
    fn test_braces_in_values() {
        let bib = parse(
            r#"@Article{keyword, title = {"0"{123}456{789}}, year = 2012, address="PingLeYuan"}"#,
        );
        let entry = bib.entry(0).unwrap();
        assert_eq!(entry.entry_type(), "Article");
        assert_eq!(entry.key(), "keyword");
        assert_eq!(content(&bib, "title"), r#""0"{123}456{789}"#);
        assert_eq!(entry.tag("year"), Some(&TagValue::bare("2012")));
        assert_eq!(entry.tag("address"), Some(&TagValue::bracketed("PingLeYuan")));
    }

    #[test]
    fn test_quoted_title_with_braces() {
        let bib = parse(r#"@article{k, title = "\"0\"{123}456{789}"}"#);
        assert_eq!(content(&bib, "title"), r#"\"0\"{123}456{789}"#);
        let bib = parse(r#"@article{k, title = "hello \"world\""}"#);
        assert_eq!(content(&bib, "title"), r#"hello \"world\""#);
    }

    #[test]
    fn test_concatenation() {
        let bib = parse(r#"@misc{k, address="Ping" # "Le" # "Yuan"}"#);
        assert_eq!(content(&bib, "address"), "PingLeYuan");

        let bib = parse(r#"@misc{k, month = "1~" # jan}"#);
        assert_eq!(bib.entry(0).unwrap().tag("month"), Some(&TagValue::bracketed("1~jan")));

        let bib = parse("@misc{k, month = {1 } # jan, day = jan # {1}, ref = acm # jan}");
        let entry = bib.entry(0).unwrap();
        assert_eq!(entry.tag("month"), Some(&TagValue::bracketed("1 jan")));
        assert_eq!(entry.tag("day"), Some(&TagValue::bracketed("jan1")));
        assert_eq!(entry.tag("ref"), Some(&TagValue::bare("acmjan")));
    }

    #[test]
    fn test_empty_entries() {
        let bib = parse("@book{, title = {}}");
        let entry = bib.entry(0).unwrap();
        assert_eq!(entry.key(), "");
        assert_eq!(entry.tag("title"), Some(&TagValue::bracketed("")));

        let bib = parse("@book{}");
        assert_eq!(bib.entries().len(), 1);
        assert!(bib.entry(0).unwrap().tags().is_empty());

        let bib = parse("@book{key}");
        assert_eq!(bib.entry(0).unwrap().key(), "key");
    }

    #[test]
    fn test_trailing_comma() {
        let bib = parse("@book{key, title = {T}, }");
        assert_eq!(bib.entry(0).unwrap().tag_names().collect::<Vec<_>>(), vec!["title"]);
    }

    #[test]
    fn test_header_and_comments() {
        let bib = parse("% first\n% second\n@book{a, title = {T} % note\n}\n% between\n@book{b}");
        assert_eq!(bib.header(), ["% first", "% second"]);
        assert_eq!(bib.entries().len(), 2);
        assert_eq!(bib.entry(1).unwrap().key(), "b");
    }

    #[test]
    fn test_string_constants() {
        let bib = parse("@string{NAME = {Title of Conference}}");
        let constant = &bib.string_constants()[0];
        assert_eq!(constant.name(), "NAME");
        assert_eq!(constant.value(), &TagValue::quoted("Title of Conference"));
        assert_eq!(constant.delimiter(), Delimiter::Brace);

        let bib = parse("@STRING(NAME = \"Title of Conference\")");
        let constant = &bib.string_constants()[0];
        assert_eq!(constant.value().content, "Title of Conference");
        assert_eq!(constant.delimiter(), Delimiter::Paren);
        assert!(bib.entries().is_empty());
    }

    #[test]
    fn test_string_constant_case() {
        let settings = ParseSettings {
            string_name_case: TagCase::Insensitive,
            ..ParseSettings::default()
        };
        let bib = Parser::new()
            .with_settings(settings)
            .parse_str("@string(ACME = {Acme})")
            .unwrap();
        assert_eq!(bib.string_constants()[0].name(), "acme");
    }

    #[test]
    fn test_case_sensitive_tags() {
        let settings = ParseSettings {
            entry_tag_case: TagCase::Sensitive,
            ..ParseSettings::default()
        };
        let bib = Parser::new()
            .with_settings(settings)
            .parse_str("@book{k, Title = {T}}")
            .unwrap();
        let entry = bib.entry(0).unwrap();
        assert!(entry.tag("title").is_none());
        assert!(entry.tag("Title").is_some());
    }

    #[test]
    fn test_templates() {
        let mut templates = HashMap::new();
        templates.insert(
            "article".to_string(),
            vec!["author".to_string(), "title".to_string(), "year".to_string()],
        );
        let bib = Parser::with_templates(&templates)
            .parse_str("@ARTICLE{k, year = 2001, journal = {J}, title = {T}}")
            .unwrap();
        assert_eq!(
            bib.entry(0).unwrap().tag_names().collect::<Vec<_>>(),
            vec!["author", "title", "year", "journal"]
        );
        assert_eq!(bib.entry(0).unwrap().author(), Some(""));
    }

    #[test]
    fn test_not_modified_after_parse() {
        let bib = parse("@string(a = {b})\n@book{k, title = {T}}");
        assert!(!bib.is_modified());
    }

    #[test]
    fn test_structural_errors() {
        for input in ["@book{,", "@book{,title=,}", "@book{,titl", "@book{,title = 2014"] {
            let err = Parser::new().parse_str(input).unwrap_err();
            assert!(
                matches!(err, Error::UnexpectedToken { .. }),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let err = Parser::new().parse_str("@book{,").unwrap_err();
        match err {
            Error::UnexpectedToken {
                line,
                column,
                found,
                expected,
            } => {
                assert_eq!((line, column), (1, 8));
                assert_eq!(found, TokenKind::EndOfInput);
                assert_eq!(
                    expected,
                    vec![TokenKind::Name, TokenKind::StringTypeMarker, TokenKind::RightBrace]
                );
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_lexical_error() {
        let err = Parser::new()
            .parse_str("@book{,ti?le = {Hadoop}}")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Lexical {
                character: '?',
                ..
            }
        ));
    }

    #[test]
    fn test_trailing_comment_rejected() {
        let err = Parser::new().parse_str("@book{k}\n% done\n").unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedToken {
                found: TokenKind::EndOfInput,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_reader() {
        let input = "% header\n@book{k, title = {T}}\n";
        let bib = Parser::new().parse_reader(input.as_bytes()).unwrap();
        assert_eq!(bib.header(), ["% header"]);
        assert_eq!(bib.entry(0).unwrap().title(), Some("T"));
    }
}
