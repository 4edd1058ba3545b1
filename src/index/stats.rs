use crate::index::term_index::TermIndex;
use crate::index::types::Page;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Summary numbers for an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub terms: usize,
    /// Sum of page-set sizes over all entries
    pub page_references: usize,
    pub distinct_pages: usize,
    pub first_page: Option<Page>,
    pub last_page: Option<Page>,
    /// Range tokens written when the index is rendered
    pub range_tokens: usize,
}

impl IndexStats {
    pub fn from_index(index: &TermIndex) -> Self {
        let mut pages = BTreeSet::new();
        let mut stats = IndexStats {
            terms: index.len(),
            ..Default::default()
        };

        for entry in index.entries() {
            stats.page_references += entry.page_count();
            stats.range_tokens += entry.ranges().len();
            pages.extend(entry.pages());
        }

        stats.distinct_pages = pages.len();
        stats.first_page = pages.first().copied();
        stats.last_page = pages.last().copied();
        stats
    }

    /// Average number of pages per term
    pub fn pages_per_term(&self) -> f64 {
        if self.terms == 0 {
            0.0
        } else {
            self.page_references as f64 / self.terms as f64
        }
    }
}
