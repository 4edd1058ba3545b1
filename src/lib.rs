//! # bookindex - Back-of-Book Index
//!
//! Maintains the index at the back of a book: every term maps to the sorted
//! set of pages it appears on, and page lists render in range-compressed form
//! (`cat 1-3, 5, 7-8`).
//!
//! ## Architecture
//!
//! - [`index`] - The term index, its text codec and statistics
//! - [`output`] - Colored terminal rendering
//! - [`utils`] - Range compression and configuration
//! - [`error`] - Error types
//!
//! ## Quick Start
//!
//! ```
//! use bookindex::index::TermIndex;
//!
//! let mut index = TermIndex::new();
//! index.add_term("cat", 1);
//! index.add_term("cat", 2);
//! index.add_term("cat", 3);
//! index.add_term("dog", 5);
//! assert_eq!(index.render_all(), vec!["cat 1-3", "dog 5"]);
//!
//! index.remove_page(2);
//! assert_eq!(index.search_by_prefix("ca"), vec!["cat 1, 3"]);
//! ```

pub mod error;
pub mod index;
pub mod output;
pub mod utils;

pub use error::{IndexError, Result};
pub use index::{Entry, IndexStats, Page, TermIndex};
