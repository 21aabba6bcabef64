//! CLI-specific error types
//!
//! Every subsystem failure surfaces here before the process exits; the code
//! says which stage failed, the message carries the subsystem's own report.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::index::IndexError;
use crate::reader::ReaderError;
use crate::writer::WriterError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Invalid flag combination or configuration value
    ConfigError,
    /// Input could not be opened or parsed
    ReadError,
    /// Index accumulation or build failed
    IndexError,
    /// Tensor or map file could not be written
    WriteError,
    /// Other I/O failure
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TNS_CLI_CONFIG_ERROR",
            Self::ReadError => "TNS_CLI_READ_ERROR",
            Self::IndexError => "TNS_CLI_INDEX_ERROR",
            Self::WriteError => "TNS_CLI_WRITE_ERROR",
            Self::IoError => "TNS_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    fatal: bool,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            fatal: true,
        }
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the originating error was fatal severity
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(CliErrorCode::ConfigError, e.to_string())
    }
}

impl From<ReaderError> for CliError {
    fn from(e: ReaderError) -> Self {
        Self::new(CliErrorCode::ReadError, e.to_string())
    }
}

impl From<IndexError> for CliError {
    fn from(e: IndexError) -> Self {
        let fatal = e.is_fatal();
        let mut err = Self::new(CliErrorCode::IndexError, e.to_string());
        err.fatal = fatal;
        err
    }
}

impl From<WriterError> for CliError {
    fn from(e: WriterError) -> Self {
        Self::new(CliErrorCode::WriteError, e.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::new(CliErrorCode::IoError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
