//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file location and loading
//! - [`ranges`] - Range compression of page lists (`1-3, 5, 7-8`)
//!
//! ```
//! use bookindex::utils::format_ranges;
//!
//! assert_eq!(format_ranges([1, 2, 3, 5, 7, 8]), "1-3, 5, 7-8");
//! ```

pub mod app_data;
pub mod ranges;

pub use app_data::*;
pub use ranges::*;
