use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::entry::{Entry, Part, StringConstant};
use crate::error::Result;
use crate::parse::Parser;
use crate::search::{self, SortBy};
use crate::ser::{Serializer, WriteSettings};

/// An in-memory `.bib` document.
///
/// Header comment lines, string constants and entries are each kept in source order. The
/// document is marked modified by its own structural changes, and reports as modified while any
/// of its parts is.
#[derive(Debug, Clone, Default)]
pub struct Bibliography {
    header: Vec<String>,
    string_constants: Vec<StringConstant>,
    entries: Vec<Entry>,
    modified: bool,
}

impl Bibliography {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document with the default [`Parser`].
    #[allow(clippy::should_implement_trait)]
    pub fn parse(input: &str) -> Result<Self> {
        Parser::new().parse_str(input)
    }

    /// Replace the contents with the document read from `reader`.
    ///
    /// On error the document is left empty.
    pub fn read<R: io::BufRead>(&mut self, reader: R, parser: &Parser<'_>) -> Result<()> {
        self.clear();
        *self = parser.parse_reader(reader)?;
        Ok(())
    }

    pub fn read_path<P: AsRef<Path>>(&mut self, path: P, parser: &Parser<'_>) -> Result<()> {
        self.clear();
        let file = File::open(path)?;
        self.read(BufReader::new(file), parser)
    }

    /// Write the whole document and mark it saved.
    pub fn save<W: Write>(&mut self, writer: W, settings: &WriteSettings) -> Result<()> {
        let mut ser = Serializer::new(writer, settings.clone())?;
        ser.serialize_bibliography(self)?;
        ser.flush()?;
        debug!(
            constants = self.string_constants.len(),
            entries = self.entries.len(),
            "saved bibliography"
        );
        self.mark_saved();
        Ok(())
    }

    pub fn save_path<P: AsRef<Path>>(&mut self, path: P, settings: &WriteSettings) -> Result<()> {
        let file = File::create(path)?;
        self.save(BufWriter::new(file), settings)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn add_header_line(&mut self, line: impl Into<String>) {
        self.header.push(line.into());
        self.modified = true;
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries can be edited in place but not added or removed through this slice.
    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    pub fn string_constants(&self) -> &[StringConstant] {
        &self.string_constants
    }

    pub fn string_constants_mut(&mut self) -> &mut [StringConstant] {
        &mut self.string_constants
    }

    /// Append a part to the sequence matching its kind.
    pub fn add_part(&mut self, part: Part) {
        match part {
            Part::Entry(entry) => self.add_entry(entry),
            Part::StringConstant(constant) => self.add_string_constant(constant),
        }
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.modified = true;
    }

    pub fn add_string_constant(&mut self, constant: StringConstant) {
        self.string_constants.push(constant);
        self.modified = true;
    }

    pub fn remove_entry(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        self.modified = true;
        Some(self.entries.remove(index))
    }

    pub fn remove_string_constant(&mut self, index: usize) -> Option<StringConstant> {
        if index >= self.string_constants.len() {
            return None;
        }
        self.modified = true;
        Some(self.string_constants.remove(index))
    }

    /// Remove everything, leaving an unmodified empty document.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_modified(&self) -> bool {
        self.modified
            || self.entries.iter().any(Entry::is_modified)
            || self.string_constants.iter().any(StringConstant::is_modified)
    }

    /// Clear the modified flag of the document and of every part.
    pub fn mark_saved(&mut self) {
        self.modified = false;
        self.entries.iter_mut().for_each(Entry::mark_saved);
        self.string_constants
            .iter_mut()
            .for_each(StringConstant::mark_saved);
    }

    /// Entries whose key (if `include_key`) or any of `tag_names` contains `needle`.
    pub fn search_entries<S: AsRef<str>>(
        &self,
        tag_names: &[S],
        include_key: bool,
        needle: &str,
        case_sensitive: bool,
    ) -> Vec<&Entry> {
        search::search(&self.entries, tag_names, include_key, needle, case_sensitive)
    }

    pub fn sort_entries(&mut self, by: SortBy) {
        search::sort(&mut self.entries, by);
        self.modified = true;
    }

    /// Where `entry` belongs in entries already sorted by `by`.
    pub fn find_insert_index(&self, entry: &Entry, by: SortBy) -> usize {
        search::find_insert_index(&self.entries, entry, by)
    }
}
