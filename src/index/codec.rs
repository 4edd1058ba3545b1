//! Line-oriented text format.
//!
//! Each line holds a term followed by range tokens:
//!
//! ```text
//! cat 1-3, 5, 7-8
//! dog 5
//! ```
//!
//! Terms cannot contain spaces or commas; there is no escaping.

use crate::error::{IndexError, Result};
use crate::index::term_index::TermIndex;
use crate::index::types::Page;
use crate::utils::ranges::{parse_range_token, PageRange};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// A parsed line: the term and its page ranges in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub term: String,
    pub ranges: Vec<PageRange>,
}

impl ParsedLine {
    /// Every page named by the line, ranges expanded lazily
    pub fn pages(&self) -> impl Iterator<Item = Page> + '_ {
        self.ranges.iter().flat_map(PageRange::pages)
    }

    pub fn has_pages(&self) -> bool {
        !self.ranges.is_empty()
    }
}

/// Parse one line of the text format.
///
/// Returns `None` for blank lines. `line_number` is 1-based and only used in
/// error reports.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<ParsedLine>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let mut parts = line.split(' ');
    let term = parts.next().unwrap_or_default().to_string();
    let mut ranges = Vec::new();

    for token in parts.flat_map(|part| part.split(',')) {
        // Repeated separators leave empty tokens behind
        if token.is_empty() {
            continue;
        }
        let range = parse_range_token(token).map_err(|kind| IndexError::Format {
            line: line_number,
            token: token.to_string(),
            kind,
        })?;
        ranges.push(range);
    }

    Ok(Some(ParsedLine { term, ranges }))
}

/// Merge the contents of `reader` into `index`.
///
/// Lines are applied one at a time. On the first malformed line the error is
/// returned and every earlier line stays merged. Returns the number of lines
/// that contributed pages; blank and term-only lines are not counted.
pub fn read_into<R: BufRead>(index: &mut TermIndex, reader: R) -> Result<usize> {
    let mut applied = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(parsed) = parse_line(&line, i + 1)? else {
            continue;
        };
        if !parsed.has_pages() {
            continue;
        }

        for page in parsed.pages() {
            index.add_term(&parsed.term, page);
        }
        applied += 1;
    }

    Ok(applied)
}

/// Write one rendered entry per line
pub fn write_index<W: Write>(index: &TermIndex, writer: &mut W) -> Result<()> {
    index.print_index(writer)?;
    writer.flush()?;
    Ok(())
}

impl TermIndex {
    /// Merge an index file into this index. See [`read_into`].
    pub fn load_from_file(&mut self, path: &Path) -> Result<usize> {
        let file = File::open(path).map_err(|e| IndexError::file(path, e))?;
        let applied = read_into(self, BufReader::new(file)).map_err(|e| match e {
            IndexError::Io(source) => IndexError::file(path, source),
            other => other,
        })?;

        info!(path = %path.display(), lines = applied, entries = self.len(), "loaded index");
        Ok(applied)
    }

    /// Write this index to `path`, replacing any existing file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| IndexError::file(path, e))?;
        let mut writer = BufWriter::new(file);
        write_index(self, &mut writer).map_err(|e| match e {
            IndexError::Io(source) => IndexError::file(path, source),
            other => other,
        })?;

        info!(path = %path.display(), entries = self.len(), "saved index");
        Ok(())
    }
}

impl FromStr for TermIndex {
    type Err = IndexError;

    fn from_str(text: &str) -> Result<Self> {
        let mut index = TermIndex::new();
        let lines = read_into(&mut index, text.as_bytes())?;
        debug!(lines, "parsed index text");
        Ok(index)
    }
}
