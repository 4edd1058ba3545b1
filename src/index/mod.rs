pub mod codec;
pub mod stats;
pub mod term_index;
pub mod types;

pub use codec::{parse_line, read_into, write_index, ParsedLine};
pub use stats::IndexStats;
pub use term_index::TermIndex;
pub use types::*;
