//! Error types module
//!
//! All failures the admin engine can surface are unified under [`AppError`].
//! Every failure is scoped to the user action that triggered it; none of them
//! is fatal to the process. Front-ends use [`ErrorMetadata`] to decide how a
//! failure is presented.

use serde::{Deserialize, Serialize};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a failed upload
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the operator.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "UPLOAD_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether the triggering action can simply be retried
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the operator
    fn suggested_action(&self) -> Option<&'static str>;

    /// Operator-facing message (may differ from the internal message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// One schema violation attached to a form path such as `socialMedia.0.link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Issue attached to the whole form rather than one field.
    pub fn root(message: impl Into<String>) -> Self {
        Self::new("root", message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Server response did not contain a file URL")]
    MissingMediaUrl,

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldIssue>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::InvalidInput(format!("URL parsing error: {}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::UploadFailed(_) => (
            "UPLOAD_FAILED",
            true,
            Some("Select the file again"),
            LogLevel::Warn,
        ),
        AppError::DeleteFailed(_) => (
            "DELETE_FAILED",
            true,
            Some("The file stays on the server; remove it manually if needed"),
            LogLevel::Warn,
        ),
        AppError::MissingMediaUrl => (
            "MISSING_MEDIA_URL",
            false,
            Some("Check the file endpoint response format"),
            LogLevel::Error,
        ),
        AppError::Validation(_) => (
            "VALIDATION_ERROR",
            false,
            Some("Fix the highlighted fields and submit again"),
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Check the entered value and try again"),
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            "NOT_FOUND",
            false,
            Some("Verify the record ID exists"),
            LogLevel::Debug,
        ),
        AppError::Api { status, .. } if *status >= 500 => (
            "API_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        AppError::Api { .. } => (
            "API_ERROR",
            false,
            Some("Check the submitted data"),
            LogLevel::Warn,
        ),
        AppError::Transport(_) => (
            "TRANSPORT_ERROR",
            true,
            Some("Check the network connection and retry"),
            LogLevel::Warn,
        ),
        AppError::UnknownResource(_) => (
            "UNKNOWN_RESOURCE",
            false,
            Some("Use one of the configured resource keys"),
            LogLevel::Debug,
        ),
        AppError::Config(_) => (
            "CONFIG_ERROR",
            false,
            Some("Check environment variables"),
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::UploadFailed(msg) => msg.clone(),
            AppError::DeleteFailed(msg) => msg.clone(),
            AppError::MissingMediaUrl => "Serverdan fayl URL topilmadi".to_string(),
            AppError::Validation(_) => "Maʼlumotlarni tekshiring".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Api { message, .. } => message.clone(),
            AppError::Transport(msg) => msg.clone(),
            AppError::UnknownResource(key) => format!("Unknown resource: {}", key),
            AppError::Config(msg) => msg.clone(),
            AppError::InternalWithSource { message, .. } => message.clone(),
        }
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

/// Log a failed action at the level its error calls for.
pub fn log_error(error: &AppError, action: &str) {
    let code = error.error_code();
    let recoverable = error.is_recoverable();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code, recoverable, "{} failed", action);
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code, recoverable, "{} failed", action);
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code, recoverable, "{} failed", action);
        }
    }
}

impl AppError {
    /// Field issues carried by a validation failure; empty for other variants.
    pub fn field_issues(&self) -> &[FieldIssue] {
        match self {
            AppError::Validation(issues) => issues,
            _ => &[],
        }
    }
}
