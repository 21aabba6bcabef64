//! Tensor writer error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::index::IndexError;

/// Result type for writer operations
pub type WriterResult<T> = Result<T, WriterError>;

/// Tensor and map-file writer errors
#[derive(Debug, Error)]
pub enum WriterError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write to {path} failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("flush of {path} failed: {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("value \"{value}\" at line {line} is not a number")]
    BadValue { value: String, line: u64 },

    #[error("failed to write map file {path}: {source}")]
    Map {
        path: PathBuf,
        #[source]
        source: IndexError,
    },
}
