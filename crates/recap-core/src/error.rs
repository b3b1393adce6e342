//! Error types and exit codes for recap
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Data error (missing vault, missing note)

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
    /// Data error - missing vault or note (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during recap operations
#[derive(Error, Debug)]
pub enum RecapError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("unknown recap kind: {0} (expected: monthly, weekly, or summary)")]
    UnknownRecapKind(String),

    // Data errors (exit code 3)
    #[error("vault not found: {path:?}")]
    VaultNotFound { path: PathBuf },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{kind} recap lock poisoned by an earlier panic")]
    LockPoisoned { kind: String },

    #[error("{0}")]
    Other(String),
}

impl RecapError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        RecapError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        RecapError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        RecapError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RecapError::UsageError(_)
            | RecapError::InvalidValue { .. }
            | RecapError::UnknownRecapKind(_) => ExitCode::Usage,

            RecapError::VaultNotFound { .. } | RecapError::NotFound { .. } => ExitCode::Data,

            RecapError::Io(_)
            | RecapError::Json(_)
            | RecapError::Toml(_)
            | RecapError::FailedOperationWithTarget { .. }
            | RecapError::LockPoisoned { .. }
            | RecapError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            RecapError::UsageError(_) => "usage_error",
            RecapError::InvalidValue { .. } => "invalid_value",
            RecapError::UnknownRecapKind(_) => "unknown_recap_kind",
            RecapError::VaultNotFound { .. } => "vault_not_found",
            RecapError::NotFound { .. } => "not_found",
            RecapError::Io(_) => "io_error",
            RecapError::Json(_) => "json_error",
            RecapError::Toml(_) => "toml_error",
            RecapError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            RecapError::LockPoisoned { .. } => "lock_poisoned",
            RecapError::Other(_) => "other",
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

/// Result type alias for recap operations
pub type Result<T> = std::result::Result<T, RecapError>;
