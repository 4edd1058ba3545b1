use crate::utils::ranges::RangeError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for index operations
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error on {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error on line {line}: bad range token '{token}': {kind}")]
    Format {
        line: usize,
        token: String,
        kind: RangeError,
    },
}

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, IndexError>;

impl IndexError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexError::File {
            path: path.into(),
            source,
        }
    }

    /// Line number of a format error (1-based), if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            IndexError::Format { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, IndexError::Format { .. })
    }
}
