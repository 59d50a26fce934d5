//! Media upload field
//!
//! Uploads picked files into the field's category and stores the server's
//! URLs as the form value: a string in single mode, a list otherwise. When a
//! sibling media-type field selects a value listed in `manual_input_when`, the
//! field switches to a typed URL (YouTube links are normalised to embeds).

use std::sync::Arc;

use fonon_core::{
    infer_media_type, log_error, normalize_youtube_url, AppError, AppResult, ErrorMetadata, MediaFile,
    MediaKind, MediaStore, Notice, Notifier, Record,
};
use serde_json::Value;

use super::descriptor::{MediaUploadField, UploadMode};
use crate::uploads::{PendingUploads, Registration, UploadRegistry};
use crate::values::{string_array, string_list};

const DELETE_FAILED_TITLE: &str = "Media o‘chirishda xatolik";
const VIDEO_NEEDS_LINK: &str = "Video fayllar uchun YouTube havolasini kiriting.";

/// Result of one file selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Stored values appended to the field, in selection order.
    pub uploaded: Vec<String>,
    /// One message per file that could not be added.
    pub failed: Vec<String>,
    /// Files dropped because of the file limit.
    pub skipped: usize,
}

pub struct MediaUploadController {
    field: MediaUploadField,
    uploads: Arc<PendingUploads>,
    was_manual: bool,
    _registration: Registration,
}

impl MediaUploadController {
    pub fn mount(
        field: MediaUploadField,
        values: &Record,
        registry: &UploadRegistry,
        store: Arc<dyn MediaStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let uploads = Arc::new(PendingUploads::new(store, notifier, DELETE_FAILED_TITLE));
        let registration = registry.register(uploads.clone());
        let was_manual = manual_mode(&field, values);
        Self {
            field,
            uploads,
            was_manual,
            _registration: registration,
        }
    }

    pub fn field(&self) -> &MediaUploadField {
        &self.field
    }

    pub fn pending_uploads(&self) -> &Arc<PendingUploads> {
        &self.uploads
    }

    /// Non-empty stored values of the field.
    pub fn values(&self, values: &Record) -> Vec<String> {
        string_list(values.get(&self.field.name))
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub fn is_manual(&self, values: &Record) -> bool {
        manual_mode(&self.field, values)
    }

    pub fn remaining_slots(&self, values: &Record) -> Option<usize> {
        self.field
            .resolved_max_files()
            .map(|max| max.saturating_sub(self.values(values).len()))
    }

    pub fn is_limit_reached(&self, values: &Record) -> bool {
        self.remaining_slots(values) == Some(0)
    }

    /// Counter text such as `2/3 rasm`, when the field has a limit.
    pub fn counter(&self, values: &Record) -> Option<String> {
        self.field.resolved_max_files().map(|max| {
            format!(
                "{}/{} {}",
                self.values(values).len(),
                max,
                self.field.counter_label()
            )
        })
    }

    /// Whether the file picker should accept several files at once.
    pub fn allows_multiple_selection(&self) -> bool {
        self.field.mode == UploadMode::Multiple
            && self.field.resolved_max_files().map_or(true, |max| max > 1)
    }

    pub fn accept(&self) -> &str {
        self.field.accept.as_deref().unwrap_or("image/*")
    }

    /// Upload a selection of files, one after another, and append the
    /// uploaded values to the field.
    pub async fn select_files(&self, values: &mut Record, files: Vec<MediaFile>) -> SelectionOutcome {
        let mut outcome = SelectionOutcome::default();
        if files.is_empty() || self.is_manual(values) {
            return outcome;
        }

        let notifier = self.uploads.notifier();
        let mut allowed = files;
        if let Some(remaining) = self.remaining_slots(values) {
            if remaining == 0 {
                notifier.notify(Notice::error(
                    "Rasmlar limiti tugagan",
                    Some("Yangi rasm qo‘shish uchun avval mavjudlarini o‘chiring.".to_string()),
                ));
                outcome.skipped = allowed.len();
                return outcome;
            }
            if allowed.len() > remaining {
                notifier.notify(Notice::error(
                    "Rasmlar soni cheklangan",
                    Some(format!("Faqat {} ta rasm qo‘shish mumkin.", remaining)),
                ));
                outcome.skipped = allowed.len() - remaining;
                allowed.truncate(remaining);
            }
        }

        let existing = self.values(values);
        let refuse_videos = self.field.manual_input_when.iter().any(|v| v == "video");

        for file in allowed {
            if refuse_videos && infer_media_type(&file.name, &file.content_type) == Some(MediaKind::Video) {
                outcome.failed.push(VIDEO_NEEDS_LINK.to_string());
                continue;
            }

            let file_name = file.name.clone();
            match self.uploads.store().upload(&self.field.upload_category, file).await {
                Ok(media) => {
                    let stored = media.stored_value().to_string();
                    self.uploads.track(stored.clone(), media).await;
                    outcome.uploaded.push(stored);
                }
                Err(err) => {
                    tracing::info_span!("media_upload", field = %self.field.name, file = %file_name)
                        .in_scope(|| log_error(&err, "Media upload"));
                    let message = err.client_message();
                    outcome.failed.push(if message.is_empty() {
                        "Yuklab bo‘lmadi".to_string()
                    } else {
                        message
                    });
                }
            }
        }

        if !outcome.uploaded.is_empty() {
            let mut next = existing;
            next.extend(outcome.uploaded.iter().cloned());
            self.apply_values(values, next);
        }

        if let Some(first) = outcome.failed.first() {
            notifier.notify(Notice::error("Baʼzi rasmlar yuklanmadi", Some(first.clone())));
        }

        outcome
    }

    /// Remove a value; its file is deleted only when this session uploaded it.
    pub async fn remove(&self, values: &mut Record, url: &str) {
        let next: Vec<String> = self
            .values(values)
            .into_iter()
            .filter(|v| v != url)
            .collect();
        self.apply_values(values, next);
        self.uploads.remove_and_delete(url).await;
    }

    /// Commit a typed URL in manual mode. Blank input clears the field;
    /// YouTube links are stored as embed URLs; anything else is refused and
    /// leaves the value unchanged.
    pub fn commit_manual_url(&self, values: &mut Record, raw: &str) -> AppResult<()> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            values.insert(self.field.name.clone(), Value::String(String::new()));
            return Ok(());
        }

        match normalize_youtube_url(trimmed) {
            Some(normalized) => {
                values.insert(self.field.name.clone(), Value::String(normalized));
                Ok(())
            }
            None => {
                let message = "Yaroqli YouTube havolasini kiriting";
                self.uploads.notifier().notify(Notice::error(message, None));
                Err(AppError::InvalidInput(message.to_string()))
            }
        }
    }

    /// Text shown in the manual URL input.
    pub fn manual_value(&self, values: &Record) -> String {
        match values.get(&self.field.name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .first()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        }
    }

    /// React to a change of the sibling media-type value. Entering manual
    /// mode discards this session's uploads; either transition clears the
    /// field.
    pub async fn sync_manual_mode(&mut self, values: &mut Record) {
        let manual = self.is_manual(values);
        if self.field.media_type_field.is_none() {
            self.was_manual = manual;
            return;
        }

        if manual && !self.was_manual {
            if self.uploads.is_empty() {
                self.uploads.forget_all();
            } else {
                self.uploads.discard().await;
            }
            values.insert(self.field.name.clone(), self.empty_value());
        } else if !manual && self.was_manual {
            self.uploads.forget_all();
            values.insert(self.field.name.clone(), self.empty_value());
        }

        self.was_manual = manual;
    }

    /// Take the current media type as the new baseline without side effects;
    /// used when the whole form is reset.
    pub fn resync_mode(&mut self, values: &Record) {
        self.was_manual = self.is_manual(values);
    }

    pub async fn unmount(self) {
        self.uploads.release().await;
    }

    fn apply_values(&self, values: &mut Record, next: Vec<String>) {
        let next: Vec<String> = next.into_iter().filter(|v| !v.is_empty()).collect();
        let value = match self.field.mode {
            UploadMode::Single => Value::String(next.into_iter().next().unwrap_or_default()),
            UploadMode::Multiple => string_array(&next),
        };
        values.insert(self.field.name.clone(), value);
    }

    fn empty_value(&self) -> Value {
        match self.field.mode {
            UploadMode::Single => Value::String(String::new()),
            UploadMode::Multiple => Value::Array(Vec::new()),
        }
    }
}

fn manual_mode(field: &MediaUploadField, values: &Record) -> bool {
    let Some(type_field) = field.media_type_field.as_deref() else {
        return false;
    };
    if field.manual_input_when.is_empty() {
        return false;
    }
    let current = values.get(type_field).and_then(Value::as_str).unwrap_or("");
    field.manual_input_when.iter().any(|v| v == current)
}

impl std::fmt::Debug for MediaUploadController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaUploadController")
            .field("name", &self.field.name)
            .field("pending", &self.uploads.len())
            .field("was_manual", &self.was_manual)
            .finish()
    }
}
