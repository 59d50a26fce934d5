//! Social links field: rows of `{platform, link}` where `platform` is an
//! uploaded icon URL.

use std::sync::Arc;

use fonon_core::{log_error, AppError, AppResult, ErrorMetadata, MediaFile, MediaStore, Notice, Notifier, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::descriptor::SocialLinksField;
use crate::uploads::{PendingUploads, Registration, UploadRegistry};

const DELETE_FAILED_TITLE: &str = "Platform rasmni o‘chirishda xatolik";
const UPLOAD_FAILED_TITLE: &str = "Platform rasmni yuklashda xatolik";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub link: String,
}

impl SocialLink {
    /// Read one stored entry: an object, a JSON-encoded object, or a legacy
    /// bare string taken as the platform.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Object(map)) => Self::from_map(&map),
                _ => SocialLink {
                    platform: s.clone(),
                    link: String::new(),
                },
            },
            _ => SocialLink::default(),
        }
    }

    fn from_map(map: &Record) -> Self {
        let get = |key: &str| map.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
        SocialLink {
            platform: get("platform"),
            link: get("link"),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "platform": self.platform, "link": self.link })
    }
}

pub fn read_social_links(value: Option<&Value>) -> Vec<SocialLink> {
    match value {
        Some(Value::Array(items)) => items.iter().map(SocialLink::from_value).collect(),
        _ => Vec::new(),
    }
}

pub struct SocialLinksController {
    field: SocialLinksField,
    uploads: Arc<PendingUploads>,
    _registration: Registration,
}

impl SocialLinksController {
    pub fn mount(
        field: SocialLinksField,
        registry: &UploadRegistry,
        store: Arc<dyn MediaStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let uploads = Arc::new(PendingUploads::new(store, notifier, DELETE_FAILED_TITLE));
        let registration = registry.register(uploads.clone());
        Self {
            field,
            uploads,
            _registration: registration,
        }
    }

    pub fn field(&self) -> &SocialLinksField {
        &self.field
    }

    pub fn pending_uploads(&self) -> &Arc<PendingUploads> {
        &self.uploads
    }

    pub fn rows(&self, values: &Record) -> Vec<SocialLink> {
        read_social_links(values.get(&self.field.name))
    }

    pub fn add_row(&self, values: &mut Record) {
        let mut rows = self.rows(values);
        rows.push(SocialLink::default());
        self.write(values, &rows);
    }

    /// Remove a row; a pending icon of that row is deleted first.
    pub async fn remove_row(&self, values: &mut Record, index: usize) -> AppResult<()> {
        let mut rows = self.rows(values);
        let row = rows.get(index).ok_or_else(|| out_of_range(index))?;
        if !row.platform.is_empty() {
            self.uploads.remove_and_delete(&row.platform).await;
        }
        rows.remove(index);
        self.write(values, &rows);
        Ok(())
    }

    pub fn set_link(&self, values: &mut Record, index: usize, link: &str) -> AppResult<()> {
        let mut rows = self.rows(values);
        let row = rows.get_mut(index).ok_or_else(|| out_of_range(index))?;
        row.link = link.to_string();
        self.write(values, &rows);
        Ok(())
    }

    /// Upload a platform icon for a row. A different icon uploaded earlier in
    /// this session is deleted once the new one is stored.
    pub async fn upload_icon(&self, values: &mut Record, index: usize, file: MediaFile) -> AppResult<String> {
        if index >= self.rows(values).len() {
            return Err(out_of_range(index));
        }

        let media = match self.uploads.store().upload(&self.field.upload_category, file).await {
            Ok(media) => media,
            Err(err) => {
                tracing::info_span!("platform_icon", field = %self.field.name)
                    .in_scope(|| log_error(&err, "Platform icon upload"));
                self.uploads
                    .notifier()
                    .notify(Notice::error(UPLOAD_FAILED_TITLE, Some(err.client_message())));
                return Err(err);
            }
        };
        let stored = media.stored_value().to_string();

        let mut rows = self.rows(values);
        let previous = rows[index].platform.clone();
        if !previous.is_empty() && previous != stored {
            self.uploads.remove_and_delete(&previous).await;
        }
        self.uploads.track(stored.clone(), media).await;

        rows[index].platform = stored.clone();
        self.write(values, &rows);
        Ok(stored)
    }

    pub async fn unmount(self) {
        self.uploads.release().await;
    }

    fn write(&self, values: &mut Record, rows: &[SocialLink]) {
        values.insert(
            self.field.name.clone(),
            Value::Array(rows.iter().map(SocialLink::to_value).collect()),
        );
    }
}

fn out_of_range(index: usize) -> AppError {
    AppError::InvalidInput(format!("No social link row at index {}", index))
}

impl std::fmt::Debug for SocialLinksController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialLinksController")
            .field("name", &self.field.name)
            .field("pending", &self.uploads.len())
            .finish()
    }
}
