use crate::utils::ranges::{compress_ranges, format_ranges, PageRange};
use std::collections::BTreeSet;
use std::fmt;

/// A page number.
///
/// Signed and unvalidated: `add_term` accepts negative pages, but they cannot
/// be written back to the text format since `-` separates ranges.
pub type Page = i32;

/// One term together with the pages it appears on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub(crate) term: String,
    pub(crate) pages: BTreeSet<Page>,
}

impl Entry {
    pub(crate) fn new(term: impl Into<String>, page: Page) -> Self {
        Self {
            term: term.into(),
            pages: BTreeSet::from([page]),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Pages in ascending order
    pub fn pages(&self) -> impl Iterator<Item = Page> + '_ {
        self.pages.iter().copied()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn contains_page(&self, page: Page) -> bool {
        self.pages.contains(&page)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Consecutive runs of pages
    pub fn ranges(&self) -> Vec<PageRange> {
        compress_ranges(self.pages())
    }

    /// Range-compressed page list without the term, e.g. `1-3, 5`
    pub fn page_list(&self) -> String {
        format_ranges(self.pages())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = format!("{} {}", self.term, self.page_list());
        f.write_str(line.trim())
    }
}
