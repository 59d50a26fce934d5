//! Fonon Core Library
//!
//! This crate provides the models, error types, configuration and media helpers
//! shared by the admin engine, the HTTP client and the CLI.

pub mod config;
pub mod error;
pub mod formatters;
pub mod media_type;
pub mod media_url;
pub mod models;
pub mod notify;
pub mod traits;
pub mod youtube;

// Re-export commonly used types
pub use config::AdminConfig;
pub use error::{log_error, AppError, AppResult, ErrorMetadata, FieldIssue, LogLevel};
pub use media_type::{infer_media_type, infer_media_type_from_url};
pub use media_url::{resolve_media_url, sanitize_absolute_url};
pub use models::{DeleteTarget, LocalTime, MediaFile, MediaKind, Record, UploadedMedia};
pub use notify::{MemoryNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use traits::{MediaStore, ResourceService};
pub use youtube::{is_youtube_url, normalize_youtube_url};
