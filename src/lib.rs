//! # bibdom
//!
//! Read a `.bib` file into an ordered, editable [`Bibliography`] and write it back out.
//!
//! Parsing is a single forward pass: a [`Tokenizer`](lexer::Tokenizer) pulls characters from a
//! [`Read`] source and a table-driven [`Parser`] assembles entries and `@string` constants.
//! Tag values remember whether they were delimited, so references to string constants are
//! written back bare. The [`Serializer`] reproduces the layout given by [`WriteSettings`].
//!
//! ```
//! use bibdom::{Bibliography, WriteSettings};
//!
//! let mut bib = Bibliography::parse("@article{key, author = {Ann Lee}, year = 1990}").unwrap();
//! let key = bib.generate_unique_key(0).unwrap();
//! assert_eq!(key, "ref:lee1990a");
//!
//! let text = bibdom::to_string(&bib, &WriteSettings::default()).unwrap();
//! assert!(text.contains("@article{ref:lee1990a,"));
//! ```
pub mod bibliography;
pub mod entry;
pub mod error;
pub mod keygen;
pub mod lexer;
pub mod naming;
pub mod parse;
pub mod read;
pub mod search;
pub mod ser;
pub mod tags;
pub mod template;
pub mod token;
pub mod value;

use std::io;

pub use bibliography::Bibliography;
pub use entry::{Delimiter, Entry, Part, StringConstant};
pub use error::{Error, Result};
pub use naming::NameFormat;
pub use parse::{ParseSettings, Parser};
pub use read::{IoReader, Read, StrReader};
pub use search::SortBy;
pub use ser::{Serializer, WhiteSpace, WriteSettings, to_string, to_writer};
pub use tags::{TagCase, TagMap};
pub use template::{EntryTemplates, NoTemplates, TemplateMap};
pub use value::{TagValue, TagValueFormat};

/// Parse a document with default settings and no entry templates.
pub fn from_str(input: &str) -> Result<Bibliography> {
    Parser::new().parse_str(input)
}

/// Parse a document from a buffered stream with default settings and no entry templates.
pub fn from_reader<R: io::BufRead>(reader: R) -> Result<Bibliography> {
    Parser::new().parse_reader(reader)
}
