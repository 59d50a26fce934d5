//! Models shared by the engine, the HTTP client and the CLI.

pub mod media;
pub mod time;

pub use media::{DeleteTarget, MediaFile, MediaKind, UploadedMedia};
pub use time::LocalTime;

/// A backend record or form payload as a JSON object.
pub type Record = serde_json::Map<String, serde_json::Value>;
