//! Range compression for page lists.
//!
//! Sorted pages collapse into inclusive runs: `{1, 2, 3, 5, 7, 8}` becomes
//! `1-3, 5, 7-8`. The same module parses a single range token back.

use crate::index::types::Page;
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Separator placed between rendered range tokens
pub const RANGE_SEPARATOR: &str = ", ";

/// Problem with a single range token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid page number '{0}'")]
    InvalidNumber(String),

    #[error("inverted range {start}-{end}")]
    Inverted { start: Page, end: Page },
}

/// An inclusive run of consecutive pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: Page,
    pub end: Page,
}

impl PageRange {
    pub fn single(page: Page) -> Self {
        Self {
            start: page,
            end: page,
        }
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Pages covered by this run, ascending
    pub fn pages(&self) -> RangeInclusive<Page> {
        self.start..=self.end
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Collapse ascending pages into runs.
///
/// Input must be strictly increasing (as yielded by a `BTreeSet`).
pub fn compress_ranges<I>(pages: I) -> Vec<PageRange>
where
    I: IntoIterator<Item = Page>,
{
    let mut ranges: Vec<PageRange> = Vec::new();

    for page in pages {
        match ranges.last_mut() {
            Some(run) if run.end.checked_add(1) == Some(page) => run.end = page,
            _ => ranges.push(PageRange::single(page)),
        }
    }

    ranges
}

/// Render ascending pages as comma-separated range tokens
pub fn format_ranges<I>(pages: I) -> String
where
    I: IntoIterator<Item = Page>,
{
    compress_ranges(pages)
        .iter()
        .map(PageRange::to_string)
        .collect::<Vec<_>>()
        .join(RANGE_SEPARATOR)
}

/// Parse one range token: `7` or `3-9`
pub fn parse_range_token(token: &str) -> Result<PageRange, RangeError> {
    let Some((start, end)) = token.split_once('-') else {
        return parse_page(token).map(PageRange::single);
    };

    let start = parse_page(start)?;
    let end = parse_page(end)?;
    if start > end {
        return Err(RangeError::Inverted { start, end });
    }

    Ok(PageRange { start, end })
}

fn parse_page(text: &str) -> Result<Page, RangeError> {
    text.parse::<Page>()
        .map_err(|_| RangeError::InvalidNumber(text.to_string()))
}
