use std::io;

use super::settings::WriteSettings;
use crate::error::Result;
use crate::value::TagValue;

/// Writes the individual pieces of a document as laid out by [`WriteSettings`].
pub struct Formatter {
    settings: WriteSettings,
}

impl Formatter {
    pub fn new(settings: WriteSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &WriteSettings {
        &self.settings
    }

    #[inline]
    pub fn write_new_line<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(self.settings.new_line.as_bytes())
    }

    #[inline]
    pub fn write_header_line<W>(&mut self, writer: &mut W, line: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(line.as_bytes())?;
        self.write_new_line(writer)
    }

    /// Blank line before each part.
    #[inline]
    pub fn write_part_separator<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_new_line(writer)
    }

    #[inline]
    pub fn write_entry_type<W>(&mut self, writer: &mut W, entry_type: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"@")?;
        writer.write_all(entry_type.as_bytes())
    }

    #[inline]
    pub fn write_body_start<W>(&mut self, writer: &mut W, open: char) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(open.encode_utf8(&mut [0; 4]).as_bytes())
    }

    /// `last` is set when no tags follow the key.
    #[inline]
    pub fn write_entry_key<W>(&mut self, writer: &mut W, key: &str, last: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(key.as_bytes())?;
        self.write_field_end(writer, last)
    }

    #[inline]
    pub fn write_field_start<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(self.settings.indent().as_bytes())
    }

    /// The tag name, the alignment padding and `= `.
    pub fn write_field_key<W>(&mut self, writer: &mut W, name: &str) -> Result<()>
    where
        W: ?Sized + io::Write,
    {
        let spacing = self.settings.inter_tag_spacing(name)?;
        writer.write_all(name.as_bytes())?;
        writer.write_all(spacing.as_bytes())?;
        writer.write_all(b"= ")?;
        Ok(())
    }

    #[inline]
    pub fn write_field_value<W>(&mut self, writer: &mut W, value: &TagValue) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        write!(writer, "{value}")
    }

    #[inline]
    pub fn write_field_end<W>(&mut self, writer: &mut W, last: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !(last && self.settings.remove_last_comma) {
            writer.write_all(b",")?;
        }
        self.write_new_line(writer)
    }

    #[inline]
    pub fn write_body_end<W>(&mut self, writer: &mut W, close: char) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(close.encode_utf8(&mut [0; 4]).as_bytes())?;
        self.write_new_line(writer)
    }
}
