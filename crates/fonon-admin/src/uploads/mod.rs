//! Upload lifecycle: per-field pending trackers and the form-wide registry.

pub mod pending;
pub mod registry;

pub use pending::PendingUploads;
pub use registry::{Registration, UploadHandle, UploadRegistry};
