//! Contracts of the external collaborators
//!
//! The engine never talks HTTP directly. It needs a file store that can upload
//! and delete, and one CRUD service per resource.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{DeleteTarget, MediaFile, Record, UploadedMedia};

/// Backend file store
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a file into a category and return its stored identity.
    async fn upload(&self, category: &str, file: MediaFile) -> AppResult<UploadedMedia>;

    /// Delete a stored file. Targets without a value are ignored.
    async fn delete(&self, target: &DeleteTarget) -> AppResult<()>;

    /// Absolute form of a stored reference, for display.
    fn resolve_url(&self, url: &str) -> String;
}

/// CRUD service for one resource
#[async_trait]
pub trait ResourceService: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Record>>;

    async fn get(&self, id: i64) -> AppResult<Record>;

    async fn create(&self, payload: Record) -> AppResult<Record>;

    async fn update(&self, id: i64, payload: Record) -> AppResult<Record>;

    async fn remove(&self, id: i64) -> AppResult<()>;
}
