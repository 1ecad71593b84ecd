mod formatter;
mod settings;

use std::io;

use tracing::debug;

pub use self::formatter::Formatter;
pub use self::settings::{WhiteSpace, WriteSettings};
use crate::bibliography::Bibliography;
use crate::entry::{Entry, StringConstant};
use crate::error::Result;

/// Write `bibliography` to `writer`.
#[inline]
pub fn to_writer<W>(writer: W, bibliography: &Bibliography, settings: &WriteSettings) -> Result<()>
where
    W: io::Write,
{
    let mut ser = Serializer::new(writer, settings.clone())?;
    ser.serialize_bibliography(bibliography)?;
    ser.flush()
}

pub fn to_string(bibliography: &Bibliography, settings: &WriteSettings) -> Result<String> {
    let mut out = Vec::new();
    to_writer(&mut out, bibliography, settings)?;
    // every piece written is UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Write a single entry.
pub fn entry_to_string(entry: &Entry, settings: &WriteSettings) -> Result<String> {
    let mut ser = Serializer::new(Vec::new(), settings.clone())?;
    ser.serialize_entry(entry)?;
    Ok(String::from_utf8_lossy(&ser.into_inner()).into_owned())
}

/// Writes bibliography parts to a [`std::io::Write`].
pub struct Serializer<W> {
    writer: W,
    formatter: Formatter,
}

impl<W> Serializer<W>
where
    W: io::Write,
{
    /// Create a new [`Serializer`], rejecting invalid settings.
    pub fn new(writer: W, settings: WriteSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            writer,
            formatter: Formatter::new(settings),
        })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Header lines, then string constants, then entries, each part preceded by a blank line.
    pub fn serialize_bibliography(&mut self, bibliography: &Bibliography) -> Result<()> {
        debug!(
            header = bibliography.header().len(),
            constants = bibliography.string_constants().len(),
            entries = bibliography.entries().len(),
            "writing bibliography"
        );
        for line in bibliography.header() {
            self.formatter.write_header_line(&mut self.writer, line)?;
        }
        for constant in bibliography.string_constants() {
            self.formatter.write_part_separator(&mut self.writer)?;
            self.serialize_string_constant(constant)?;
        }
        for entry in bibliography.entries() {
            self.formatter.write_part_separator(&mut self.writer)?;
            self.serialize_entry(entry)?;
        }
        Ok(())
    }

    pub fn serialize_entry(&mut self, entry: &Entry) -> Result<()> {
        let f = &mut self.formatter;
        let w = &mut self.writer;

        f.write_entry_type(w, entry.entry_type())?;
        f.write_body_start(w, '{')?;
        let count = entry.tags().len();
        f.write_entry_key(w, entry.key(), count == 0)?;

        for (i, (name, value)) in entry.tags().iter().enumerate() {
            f.write_field_start(w)?;
            f.write_field_key(w, name)?;
            f.write_field_value(w, value)?;
            f.write_field_end(w, i + 1 == count)?;
        }

        f.write_body_end(w, '}')?;
        Ok(())
    }

    /// `@string(name = value)`, with the delimiters the constant was read with.
    pub fn serialize_string_constant(&mut self, constant: &StringConstant) -> Result<()> {
        let f = &mut self.formatter;
        let w = &mut self.writer;
        let delimiter = constant.delimiter();

        f.write_entry_type(w, "string")?;
        f.write_body_start(w, delimiter.open())?;
        f.write_field_key(w, constant.name())?;
        f.write_field_value(w, constant.value())?;
        f.write_body_end(w, delimiter.close())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entry::Delimiter;
    use crate::error::Error;
    use crate::value::TagValue;

    fn entry() -> Entry {
        let mut entry = Entry::new("article");
        entry.set_key("ref:menand2004a");
        entry.set_tag("author", "Menand, S.");
        entry.set_tag_value("year", TagValue::bare("2004"));
        entry
    }

    #[test]
    fn test_entry_tabs() {
        assert_eq!(
            entry_to_string(&entry(), &WriteSettings::default()).unwrap(),
            "@article{ref:menand2004a,\n\
             \tauthor\t\t\t= {Menand, S.},\n\
             \tyear\t\t\t= 2004\n\
             }\n"
        );
    }

    #[test]
    fn test_entry_spaces_keep_comma() {
        let settings = WriteSettings {
            whitespace: WhiteSpace::Space,
            tab_size: 2,
            align_at_column: 12,
            remove_last_comma: false,
            new_line: "\r\n".to_string(),
            ..WriteSettings::default()
        };
        assert_eq!(
            entry_to_string(&entry(), &settings).unwrap(),
            "@article{ref:menand2004a,\r\n  author   = {Menand, S.},\r\n  year     = 2004,\r\n}\r\n"
        );
    }

    #[test]
    fn test_entry_unaligned() {
        let settings = WriteSettings {
            align_tag_values: false,
            ..WriteSettings::default()
        };
        assert_eq!(
            entry_to_string(&entry(), &settings).unwrap(),
            "@article{ref:menand2004a,\n\tauthor = {Menand, S.},\n\tyear = 2004\n}\n"
        );
    }

    #[test]
    fn test_entry_without_tags() {
        let mut entry = Entry::new("book");
        entry.set_key("k");
        assert_eq!(
            entry_to_string(&entry, &WriteSettings::default()).unwrap(),
            "@book{k\n}\n"
        );

        let settings = WriteSettings {
            remove_last_comma: false,
            ..WriteSettings::default()
        };
        assert_eq!(entry_to_string(&entry, &settings).unwrap(), "@book{k,\n}\n");
    }

    #[test]
    fn test_alignment_overflow() {
        let mut entry = entry();
        entry.set_tag("averyveryverylongtagname", "x");
        assert!(matches!(
            entry_to_string(&entry, &WriteSettings::default()),
            Err(Error::AlignmentOverflow { .. })
        ));
    }

    #[test]
    fn test_bibliography() {
        let mut bib = Bibliography::new();
        bib.add_header_line("% generated");
        let mut constant = StringConstant::new("acme", TagValue::quoted("Acme Journal"));
        bib.add_string_constant(constant.clone());
        constant.set_delimiter(Delimiter::Brace);
        constant.set_name("acm");
        bib.add_string_constant(constant);
        bib.add_entry(entry());

        assert_eq!(
            to_string(&bib, &WriteSettings::default()).unwrap(),
            "% generated\n\
             \n\
             @string(acme\t\t\t= \"Acme Journal\")\n\
             \n\
             @string{acm\t\t\t\t= \"Acme Journal\"}\n\
             \n\
             @article{ref:menand2004a,\n\
             \tauthor\t\t\t= {Menand, S.},\n\
             \tyear\t\t\t= 2004\n\
             }\n"
        );
    }

    #[test]
    fn test_invalid_settings() {
        let settings = WriteSettings {
            tab_size: 0,
            ..WriteSettings::default()
        };
        assert!(to_string(&Bibliography::new(), &settings).is_err());
    }
}
