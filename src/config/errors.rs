//! Configuration error types

use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("field \"{0}\" is already a tensor mode")]
    DuplicateMode(String),

    #[error("cannot set sort order: field \"{0}\" is not a tensor mode")]
    UnknownSortField(String),

    #[error("column positions are 1-indexed; \"{0}\" is not a valid selector")]
    InvalidPosition(String),

    #[error("field separator must be a single character, got \"{0}\"")]
    InvalidSeparator(String),

    #[error("field \"{0}\" is selected by name, which requires a header line")]
    NameSelectorWithoutHeader(String),
}
