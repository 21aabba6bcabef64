//! Record reader error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for reader operations
pub type ReaderResult<T> = Result<T, ReaderError>;

/// Record reader errors
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failed in {path} at line {line}: {source}")]
    Read {
        path: PathBuf,
        line: u64,
        #[source]
        source: io::Error,
    },

    #[error("{path} is empty; expected a header line")]
    MissingHeader { path: PathBuf },

    #[error("column \"{name}\" not found in the header of {path}")]
    UnknownColumn { name: String, path: PathBuf },

    #[error("{path} line {line} has {width} fields, but column {position} was selected")]
    ColumnOutOfRange {
        position: usize,
        width: usize,
        path: PathBuf,
        line: u64,
    },

    #[error("unterminated quoted field in {path} at line {line}")]
    UnterminatedQuote { path: PathBuf, line: u64 },
}
