//! Error types and exit codes for histfetch
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid config values)
//! - 3: Data error (missing collection, unreadable record store)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing collection, missing record (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for FetchError {
    fn from(err: rusqlite::Error) -> Self {
        FetchError::Sqlite(err.to_string())
    }
}

/// Errors that can occur during histfetch operations
#[derive(Error, Debug)]
pub enum FetchError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("collection not found: {path:?}")]
    CollectionNotFound { path: PathBuf },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("no saved session (run `histfetch fetch` first)")]
    NoSession,

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("database error: {0}")]
    Sqlite(String),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        FetchError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        FetchError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        FetchError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a record that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        FetchError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            FetchError::UnknownFormat(_)
            | FetchError::UsageError(_)
            | FetchError::InvalidValue { .. } => ExitCode::Usage,

            FetchError::CollectionNotFound { .. }
            | FetchError::NotFound { .. }
            | FetchError::NoSession => ExitCode::Data,

            FetchError::Io(_)
            | FetchError::Json(_)
            | FetchError::Toml(_)
            | FetchError::Sqlite(_)
            | FetchError::FailedOperation { .. }
            | FetchError::FailedOperationWithTarget { .. }
            | FetchError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            FetchError::UnknownFormat(_) => "unknown_format",
            FetchError::UsageError(_) => "usage_error",
            FetchError::InvalidValue { .. } => "invalid_value",
            FetchError::CollectionNotFound { .. } => "collection_not_found",
            FetchError::NotFound { .. } => "not_found",
            FetchError::NoSession => "no_session",
            FetchError::Io(_) => "io_error",
            FetchError::Json(_) => "json_error",
            FetchError::Toml(_) => "toml_error",
            FetchError::Sqlite(_) => "sqlite_error",
            FetchError::FailedOperation { .. } => "failed_operation",
            FetchError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            FetchError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for histfetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
