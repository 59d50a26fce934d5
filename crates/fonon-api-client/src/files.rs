//! File store endpoints: `POST /api/files/{category}` and `DELETE /api/files?path=`.

use async_trait::async_trait;
use fonon_core::{
    resolve_media_url, AppError, AppResult, DeleteTarget, MediaFile, MediaStore, UploadedMedia,
};
use serde::Deserialize;

use crate::{into_app_error, ApiClient};

/// Upload response body. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
struct UploadResponse {
    path: Option<String>,
    url: Option<String>,
}

/// [`MediaStore`] backed by the REST file endpoints.
#[derive(Clone, Debug)]
pub struct HttpMediaStore {
    client: ApiClient,
    media_base_url: Option<String>,
}

impl HttpMediaStore {
    pub fn new(client: ApiClient, media_base_url: Option<String>) -> Self {
        Self {
            client,
            media_base_url,
        }
    }

    fn upload_path(category: &str) -> String {
        format!("/api/files/{}", urlencoding::encode(category))
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, category: &str, file: MediaFile) -> AppResult<UploadedMedia> {
        let size = file.data.len();
        let mut part = reqwest::multipart::Part::bytes(file.data.to_vec()).file_name(file.name.clone());
        if !file.content_type.is_empty() {
            part = part
                .mime_str(&file.content_type)
                .map_err(|e| AppError::InvalidInput(format!("Invalid content type: {}", e)))?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let response: UploadResponse = self
            .client
            .post_multipart(&Self::upload_path(category), form)
            .await
            .map_err(|e| match into_app_error(e) {
                AppError::Api { message, .. } | AppError::Transport(message) => {
                    AppError::UploadFailed(message)
                }
                other => other,
            })?;

        let resolved = resolve_media_url(
            self.media_base_url.as_deref(),
            response.url.as_deref(),
            response.path.as_deref(),
        )
        .ok_or(AppError::MissingMediaUrl)?;

        tracing::info!(
            category = %category,
            file_name = %file.name,
            size_bytes = size,
            url = %resolved,
            "File uploaded"
        );

        Ok(UploadedMedia {
            raw_url: Some(response.url.unwrap_or_else(|| resolved.clone())),
            url: resolved,
            path: response.path,
        })
    }

    async fn delete(&self, target: &DeleteTarget) -> AppResult<()> {
        let Some(value) = target.value() else {
            return Ok(());
        };

        self.client
            .delete("/api/files", &[("path", value.to_string())])
            .await
            .map_err(|e| match into_app_error(e) {
                AppError::Api { message, .. }
                | AppError::Transport(message)
                | AppError::NotFound(message) => AppError::DeleteFailed(message),
                other => other,
            })?;

        tracing::info!(path = %value, "File deleted");
        Ok(())
    }

    fn resolve_url(&self, url: &str) -> String {
        resolve_media_url(self.media_base_url.as_deref(), Some(url), None)
            .unwrap_or_else(|| url.to_string())
    }
}
