//! Error types and exit codes for gradebridge
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, serialization)
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (malformed input, missing column, ambiguous match)

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
    /// Data error - the input files do not have the expected shape (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during a conversion
#[derive(Error, Debug)]
pub enum GradebridgeError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("malformed input in {source_name}: {reason}")]
    MalformedInput { source_name: String, reason: String },

    #[error("missing column {column:?} in {source_name}")]
    MissingColumn { source_name: String, column: String },

    #[error("unparseable date {value:?}: expected {expected}")]
    UnparseableDate { value: String, expected: String },

    #[error("ambiguous match for {key_column} {key:?}: {candidates} source rows match")]
    AmbiguousMatch {
        key_column: String,
        key: String,
        candidates: usize,
    },

    #[error("file not found: {path:?}")]
    NotFound { path: PathBuf },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl GradebridgeError {
    /// Create an error for input that does not have the expected layout
    pub fn malformed(source_name: &str, reason: impl std::fmt::Display) -> Self {
        GradebridgeError::MalformedInput {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a required column that is absent
    pub fn missing_column(source_name: &str, column: &str) -> Self {
        GradebridgeError::MissingColumn {
            source_name: source_name.to_string(),
            column: column.to_string(),
        }
    }

    /// Create an error for a date string that does not match its pattern
    pub fn unparseable_date(value: impl Into<String>, expected: &str) -> Self {
        GradebridgeError::UnparseableDate {
            value: value.into(),
            expected: expected.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GradebridgeError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GradebridgeError::UsageError(_) | GradebridgeError::InvalidValue { .. } => {
                ExitCode::Usage
            }

            GradebridgeError::MalformedInput { .. }
            | GradebridgeError::MissingColumn { .. }
            | GradebridgeError::UnparseableDate { .. }
            | GradebridgeError::AmbiguousMatch { .. }
            | GradebridgeError::NotFound { .. } => ExitCode::Data,

            GradebridgeError::Io(_)
            | GradebridgeError::Csv(_)
            | GradebridgeError::Json(_)
            | GradebridgeError::Toml(_)
            | GradebridgeError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GradebridgeError::UsageError(_) => "usage_error",
            GradebridgeError::InvalidValue { .. } => "invalid_value",
            GradebridgeError::MalformedInput { .. } => "malformed_input",
            GradebridgeError::MissingColumn { .. } => "missing_column",
            GradebridgeError::UnparseableDate { .. } => "unparseable_date",
            GradebridgeError::AmbiguousMatch { .. } => "ambiguous_match",
            GradebridgeError::NotFound { .. } => "not_found",
            GradebridgeError::Io(_) => "io_error",
            GradebridgeError::Csv(_) => "csv_error",
            GradebridgeError::Json(_) => "json_error",
            GradebridgeError::Toml(_) => "toml_error",
            GradebridgeError::Other(_) => "other",
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

/// Result type alias for gradebridge operations
pub type Result<T> = std::result::Result<T, GradebridgeError>;
