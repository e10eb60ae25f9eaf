//! Error types module
//!
//! This module provides the core error types used throughout pcast.
//! All errors are unified under the `AppError` enum which can represent database,
//! storage, validation, and the episode workflow's authorization failures.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

use crate::capability::Capability;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for denied actions and resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("No course module id supplied")]
    MissingModuleReference,

    #[error("Course module {0} does not exist")]
    ModuleNotFound(i64),

    #[error("Episode {id} does not exist in this podcast")]
    EpisodeNotFound { id: i64 },

    #[error("Missing capability {capability}")]
    PermissionDenied { capability: Capability },

    #[error("Cannot edit other people's episodes")]
    CannotEditOthers { back_link: String },

    #[error("Editing time for this episode has expired")]
    EditWindowExpired { back_link: String },
}

// Error conversion implementations
#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the resource ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size and upload again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Unauthorized(_) => (
            401,
            "UNAUTHORIZED",
            false,
            Some("Log in again and retry"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingModuleReference => (
            400,
            "MISSING_MODULE_REFERENCE",
            false,
            Some("Supply the cmid parameter"),
            false,
            LogLevel::Debug,
        ),
        AppError::ModuleNotFound(_) => (
            404,
            "MODULE_NOT_FOUND",
            false,
            Some("Verify the course module ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::EpisodeNotFound { .. } => (
            404,
            "INVALID_ENTRY",
            false,
            Some("Verify the episode belongs to this podcast"),
            false,
            LogLevel::Debug,
        ),
        AppError::PermissionDenied { .. } => (
            403,
            "NO_EDIT_PRIVILEGES",
            false,
            Some("Ask a teacher for write access to this podcast"),
            false,
            LogLevel::Warn,
        ),
        AppError::CannotEditOthers { .. } => (
            403,
            "CANNOT_EDIT_OTHERS",
            false,
            Some("Only the author or a manager can edit this episode"),
            false,
            LogLevel::Warn,
        ),
        AppError::EditWindowExpired { .. } => (
            403,
            "EDIT_TIME_EXPIRED",
            false,
            Some("Ask a manager to make the change"),
            false,
            LogLevel::Warn,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::MissingModuleReference => "MissingModuleReference",
            AppError::ModuleNotFound(_) => "ModuleNotFound",
            AppError::EpisodeNotFound { .. } => "EpisodeNotFound",
            AppError::PermissionDenied { .. } => "PermissionDenied",
            AppError::CannotEditOthers { .. } => "CannotEditOthers",
            AppError::EditWindowExpired { .. } => "EditWindowExpired",
        }
    }

    /// Link the user can follow after a denied edit, when the error carries one
    pub fn back_link(&self) -> Option<&str> {
        match self {
            AppError::CannotEditOthers { back_link } | AppError::EditWindowExpired { back_link } => {
                Some(back_link.as_str())
            }
            _ => None,
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to access file storage".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::MissingModuleReference => {
                "Course module ID was incorrect or missing".to_string()
            }
            AppError::ModuleNotFound(cmid) => {
                format!("Course module {} was not found", cmid)
            }
            AppError::EpisodeNotFound { .. } => "Incorrect entry specified".to_string(),
            AppError::PermissionDenied { .. } => {
                "You do not have permission to edit episodes".to_string()
            }
            AppError::CannotEditOthers { .. } => {
                "You cannot edit episodes posted by other people".to_string()
            }
            AppError::EditWindowExpired { .. } => {
                "The time allowed for editing this episode has passed".to_string()
            }
        }
    }
}
