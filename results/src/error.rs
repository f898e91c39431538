//! Error types for reading result sets.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading result files or result-set arguments.
#[derive(Debug, Error)]
pub enum ResultsError {
    /// A result file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A result file is not well-formed XML.
    #[error("cannot parse {path}: {source}")]
    Xml {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: quick_xml::Error,
    },

    /// Directory traversal failed.
    #[error("cannot list {path}: {source}")]
    Walk {
        /// Root of the traversal.
        path: PathBuf,
        /// Underlying error.
        source: walkdir::Error,
    },

    /// Positional arguments do not form complete `TITLE DETAIL_NAME PATH` triples.
    #[error("invalid argument count: expected TITLE DETAIL_NAME PATH triples, got {0} value(s)")]
    IncompleteTriples(usize),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, ResultsError>;
