use crate::index::types::{Entry, Page};
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Position of an entry in first-insertion order
type Seq = u64;

/// Back-of-book index: terms mapped to the pages they appear on.
///
/// Entries keep the order in which their term was first added. A term maps
/// to its sequence number for constant-time lookup, and the sequence number
/// orders the entries themselves.
#[derive(Debug, Clone, Default)]
pub struct TermIndex {
    entries: BTreeMap<Seq, Entry>,
    lookup: AHashMap<String, Seq>,
    next_seq: Seq,
}

impl TermIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn get(&self, term: &str) -> Option<&Entry> {
        self.lookup.get(term).and_then(|seq| self.entries.get(seq))
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.lookup.contains_key(term)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.lookup.clear();
    }

    /// Record that `term` appears on `page`.
    ///
    /// Unseen terms are appended as a new entry. Adding a page that is
    /// already present changes nothing.
    pub fn add_term(&mut self, term: &str, page: Page) {
        if let Some(seq) = self.lookup.get(term) {
            if let Some(entry) = self.entries.get_mut(seq) {
                entry.pages.insert(page);
            }
            return;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(seq, Entry::new(term, page));
        self.lookup.insert(term.to_string(), seq);
        debug!(term, page, "added term");
    }

    /// Delete the entry for `term`. Returns false if there was none.
    pub fn remove_term(&mut self, term: &str) -> bool {
        match self.lookup.remove(term) {
            Some(seq) => {
                self.entries.remove(&seq);
                debug!(term, "removed term");
                true
            }
            None => false,
        }
    }

    /// Rename `old_term` to `new_term`.
    ///
    /// If `new_term` already has an entry, the pages of `old_term` are merged
    /// into it and `old_term` disappears; the surviving entry keeps its place.
    /// Returns false if `old_term` does not exist.
    pub fn update_term(&mut self, old_term: &str, new_term: &str) -> bool {
        if old_term == new_term {
            return self.contains_term(old_term);
        }

        let Some(old_seq) = self.lookup.remove(old_term) else {
            return false;
        };

        match self.lookup.get(new_term).copied() {
            Some(target_seq) => {
                let moved = self.entries.remove(&old_seq).map(|e| e.pages);
                if let (Some(pages), Some(target)) = (moved, self.entries.get_mut(&target_seq)) {
                    target.pages.extend(pages);
                }
                warn!(
                    from = old_term,
                    into = new_term,
                    "rename target already exists, merged page sets"
                );
            }
            None => {
                if let Some(entry) = self.entries.get_mut(&old_seq) {
                    entry.term = new_term.to_string();
                }
                self.lookup.insert(new_term.to_string(), old_seq);
                debug!(from = old_term, to = new_term, "renamed term");
            }
        }

        true
    }

    /// Remove `page` from every entry and drop entries left without pages.
    ///
    /// Returns the number of entries dropped.
    pub fn remove_page(&mut self, page: Page) -> usize {
        let Self {
            entries, lookup, ..
        } = self;
        let before = entries.len();

        entries.retain(|_, entry| {
            entry.pages.remove(&page);
            if entry.is_empty() {
                lookup.remove(&entry.term);
                false
            } else {
                true
            }
        });

        let dropped = before - entries.len();
        debug!(page, dropped, "removed page");
        dropped
    }

    /// Entries whose term starts with `prefix`, in index order
    pub fn entries_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Entry> {
        self.entries().filter(move |e| e.term.starts_with(prefix))
    }

    /// Rendered entries whose term starts with `prefix` (case-sensitive).
    ///
    /// An empty prefix matches everything; no match yields an empty list.
    pub fn search_by_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries_with_prefix(prefix)
            .map(Entry::to_string)
            .collect()
    }

    /// Every entry rendered, one string per entry
    pub fn render_all(&self) -> Vec<String> {
        self.entries().map(Entry::to_string).collect()
    }

    /// Write every rendered entry on its own line
    pub fn print_index<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for entry in self.entries() {
            writeln!(out, "{}", entry)?;
        }
        Ok(())
    }
}

impl fmt::Display for TermIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries() {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TermIndex {
        let mut index = TermIndex::new();
        index.add_term("cat", 1);
        index.add_term("cat", 2);
        index.add_term("cat", 3);
        index.add_term("dog", 5);
        index
    }

    #[test]
    fn test_add_keeps_first_insertion_order() {
        let mut index = TermIndex::new();
        index.add_term("zebra", 9);
        index.add_term("apple", 1);
        index.add_term("zebra", 2);
        assert_eq!(index.render_all(), vec!["zebra 2, 9", "apple 1"]);
    }

    #[test]
    fn test_add_duplicate_page_is_noop() {
        let mut index = sample();
        index.add_term("dog", 5);
        assert_eq!(index.get("dog").unwrap().page_count(), 1);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_add_accepts_negative_pages() {
        let mut index = TermIndex::new();
        index.add_term("odd", -2);
        index.add_term("odd", -1);
        assert_eq!(index.render_all(), vec!["odd -2--1"]);
    }

    #[test]
    fn test_remove_term() {
        let mut index = sample();
        assert!(index.remove_term("cat"));
        assert!(!index.remove_term("cat"));
        assert!(!index.contains_term("cat"));
        assert_eq!(index.render_all(), vec!["dog 5"]);
    }

    #[test]
    fn test_terms_are_case_sensitive() {
        let mut index = sample();
        assert!(!index.remove_term("Cat"));
        index.add_term("Cat", 7);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_update_term_renames_in_place() {
        let mut index = sample();
        index.add_term("eel", 9);
        assert!(index.update_term("dog", "hound"));
        assert_eq!(index.render_all(), vec!["cat 1-3", "hound 5", "eel 9"]);
        assert!(index.get("dog").is_none());

        index.add_term("dog", 4);
        assert_eq!(index.render_all().last().unwrap(), "dog 4");
    }

    #[test]
    fn test_update_missing_term_is_noop() {
        let mut index = sample();
        assert!(!index.update_term("bird", "fish"));
        assert_eq!(index.render_all(), vec!["cat 1-3", "dog 5"]);
    }

    #[test]
    fn test_update_term_merges_on_collision() {
        let mut index = sample();
        assert!(index.update_term("dog", "cat"));
        assert_eq!(index.len(), 1);
        assert_eq!(index.render_all(), vec!["cat 1-3, 5"]);
    }

    #[test]
    fn test_update_term_to_same_name() {
        let mut index = sample();
        assert!(index.update_term("cat", "cat"));
        assert_eq!(index.render_all(), vec!["cat 1-3", "dog 5"]);
    }

    #[test]
    fn test_remove_page_prunes_empty_entries() {
        let mut index = sample();
        assert_eq!(index.remove_page(2), 0);
        assert_eq!(index.get("cat").unwrap().to_string(), "cat 1, 3");

        index.remove_page(1);
        assert_eq!(index.remove_page(3), 1);
        assert!(!index.contains_term("cat"));
        assert_eq!(index.render_all(), vec!["dog 5"]);
    }

    #[test]
    fn test_removed_term_can_return_at_end() {
        let mut index = sample();
        index.remove_page(5);
        index.add_term("ant", 1);
        index.add_term("dog", 6);
        assert_eq!(index.render_all(), vec!["cat 1-3", "ant 1", "dog 6"]);
    }

    #[test]
    fn test_search_by_prefix() {
        let mut index = sample();
        index.add_term("catalog", 11);
        assert_eq!(index.search_by_prefix("cat"), vec!["cat 1-3", "catalog 11"]);
        assert_eq!(index.search_by_prefix(""), index.render_all());
        assert!(index.search_by_prefix("Cat").is_empty());
        assert!(index.search_by_prefix("zebra").is_empty());
    }

    #[test]
    fn test_print_index() {
        let index = sample();
        let mut out = Vec::new();
        index.print_index(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "cat 1-3\ndog 5\n");
        assert_eq!(index.to_string(), "cat 1-3\ndog 5\n");
    }

    #[test]
    fn test_clear() {
        let mut index = sample();
        index.clear();
        assert!(index.is_empty());
        assert!(index.get("cat").is_none());
    }
}
