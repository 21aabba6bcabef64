//! Index error types
//!
//! Error codes:
//! - TNS_INDEX_NOT_BUILT (FATAL) - map queried before build
//! - TNS_INDEX_REBUILD (FATAL) - mutation or second build after build
//! - TNS_INDEX_KEY_NOT_FOUND (ERROR) - lookup miss on a built map
//! - TNS_INDEX_NON_NUMERIC_KEY (FATAL) - numeric build rejected a key
//! - TNS_INDEX_DUMP_FAILED (ERROR) - inverse dump could not be written
//! - TNS_INDEX_UNKNOWN_MODE (FATAL) - mode name not configured

use std::fmt;
use std::io;

/// Severity levels for index errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, caller may continue
    Error,
    /// The build is unusable, process must terminate
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// Lookup or inverse dump before build
    TnsIndexNotBuilt,
    /// Accumulate or build called on an already-built map
    TnsIndexRebuild,
    /// Key absent from a built map
    TnsIndexKeyNotFound,
    /// Key rejected by the numeric ordering policy
    TnsIndexNonNumericKey,
    /// I/O failure while dumping the inverse mapping
    TnsIndexDumpFailed,
    /// Mode name not present in the mode manager
    TnsIndexUnknownMode,
}

impl IndexErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::TnsIndexNotBuilt => "TNS_INDEX_NOT_BUILT",
            IndexErrorCode::TnsIndexRebuild => "TNS_INDEX_REBUILD",
            IndexErrorCode::TnsIndexKeyNotFound => "TNS_INDEX_KEY_NOT_FOUND",
            IndexErrorCode::TnsIndexNonNumericKey => "TNS_INDEX_NON_NUMERIC_KEY",
            IndexErrorCode::TnsIndexDumpFailed => "TNS_INDEX_DUMP_FAILED",
            IndexErrorCode::TnsIndexUnknownMode => "TNS_INDEX_UNKNOWN_MODE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            IndexErrorCode::TnsIndexNotBuilt => Severity::Fatal,
            IndexErrorCode::TnsIndexRebuild => Severity::Fatal,
            IndexErrorCode::TnsIndexKeyNotFound => Severity::Error,
            IndexErrorCode::TnsIndexNonNumericKey => Severity::Fatal,
            IndexErrorCode::TnsIndexDumpFailed => Severity::Error,
            IndexErrorCode::TnsIndexUnknownMode => Severity::Fatal,
        }
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug)]
pub struct IndexError {
    /// Error code
    code: IndexErrorCode,
    /// Human-readable message
    message: String,
    /// Offending key if applicable
    key: Option<String>,
    /// Underlying I/O error if applicable
    source: Option<io::Error>,
}

impl IndexError {
    /// Create a build-before-use violation error
    pub fn not_built(operation: &str) -> Self {
        Self {
            code: IndexErrorCode::TnsIndexNotBuilt,
            message: format!("`{}` requires `build()` to have been called first", operation),
            key: None,
            source: None,
        }
    }

    /// Create a mutation-after-build violation error
    pub fn rebuild(operation: &str) -> Self {
        Self {
            code: IndexErrorCode::TnsIndexRebuild,
            message: format!("`{}` is not permitted after `build()`", operation),
            key: None,
            source: None,
        }
    }

    /// Create a lookup-miss error carrying the missing key
    pub fn key_not_found(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            code: IndexErrorCode::TnsIndexKeyNotFound,
            message: format!("key \"{}\" not found in map", key),
            key: Some(key),
            source: None,
        }
    }

    /// Create a numeric-policy parse failure carrying the rejected key
    pub fn non_numeric_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            code: IndexErrorCode::TnsIndexNonNumericKey,
            message: format!(
                "numeric ordering requires integer keys, but \"{}\" cannot be parsed as one",
                key
            ),
            key: Some(key),
            source: None,
        }
    }

    /// Create an inverse-dump I/O error
    pub fn dump_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: IndexErrorCode::TnsIndexDumpFailed,
            message: message.into(),
            key: None,
            source: Some(source),
        }
    }

    /// Create an unknown-mode error
    pub fn unknown_mode(mode: impl Into<String>) -> Self {
        let mode = mode.into();
        Self {
            code: IndexErrorCode::TnsIndexUnknownMode,
            message: format!("mode \"{}\" is not configured", mode),
            key: Some(mode),
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the offending key, if the error carries one
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this error is fatal (requires process termination)
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
