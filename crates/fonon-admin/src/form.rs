//! Form session
//!
//! One [`FormSession`] backs the create/edit dialog of a resource page. It
//! owns the form values, the per-path validation messages, the upload
//! registry and the controllers of the mounted fields. Operator actions are
//! routed to the controller of the named field.

use std::collections::BTreeMap;
use std::sync::Arc;

use fonon_core::{AppError, AppResult, FieldIssue, MediaFile, MediaKind, MediaStore, Notifier, Record};
use indexmap::IndexMap;
use serde_json::Value;

use crate::editor::{ClipboardPayload, EmbedKind, RichTextEditor};
use crate::fields::{FieldController, FieldDescriptor, Language, SelectOption, SelectionOutcome, SocialLink};
use crate::uploads::UploadRegistry;

pub struct FormSession {
    values: Record,
    errors: BTreeMap<String, String>,
    registry: UploadRegistry,
    store: Arc<dyn MediaStore>,
    notifier: Arc<dyn Notifier>,
    fields: IndexMap<String, FieldController>,
}

impl FormSession {
    pub fn new(store: Arc<dyn MediaStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            values: Record::new(),
            errors: BTreeMap::new(),
            registry: UploadRegistry::new(),
            store,
            notifier,
            fields: IndexMap::new(),
        }
    }

    pub fn registry(&self) -> &UploadRegistry {
        &self.registry
    }

    pub fn values(&self) -> &Record {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn error(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    /// Record one message per path; the first issue for a path wins.
    pub fn set_errors(&mut self, issues: &[FieldIssue]) {
        self.errors.clear();
        for issue in issues {
            self.errors
                .entry(issue.path.clone())
                .or_insert_with(|| issue.message.clone());
        }
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn is_mounted(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn field(&self, key: &str) -> Option<&FieldController> {
        self.fields.get(key)
    }

    /// Replace all values. Mounted editors pick up their new content
    /// silently and media fields take the new media type as their baseline.
    pub fn reset(&mut self, values: Record) {
        self.values = values;
        self.errors.clear();
        for controller in self.fields.values_mut() {
            match controller {
                FieldController::Multilingual(c) => c.sync_from_values(&self.values),
                FieldController::MediaUpload(c) => c.resync_mode(&self.values),
                _ => {}
            }
        }
    }

    /// Mount a controller for every descriptor not mounted yet.
    pub fn mount(&mut self, descriptors: &[FieldDescriptor]) {
        for descriptor in descriptors {
            if self.fields.contains_key(descriptor.key()) {
                continue;
            }
            let controller = FieldController::mount(
                descriptor,
                &self.values,
                &self.registry,
                &self.store,
                &self.notifier,
            );
            self.fields.insert(descriptor.key().to_string(), controller);
        }
        tracing::debug!(
            fields = self.fields.len(),
            upload_handles = self.registry.len(),
            "Form fields mounted"
        );
    }

    /// Unmount every field. Uploads that were neither committed nor
    /// discarded are deleted.
    pub async fn unmount(&mut self) {
        let fields = std::mem::take(&mut self.fields);
        for (_, controller) in fields {
            controller.unmount().await;
        }
    }

    /// Write a value as the form itself would. Editors showing this value are
    /// updated silently and media fields react to media-type changes.
    pub async fn set_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);

        for controller in self.fields.values_mut() {
            match controller {
                FieldController::Multilingual(c) => {
                    if let Some(lang) = c.language_of(name) {
                        let html = self.values.get(name).and_then(Value::as_str).unwrap_or_default();
                        if let Some(editor) = c.editor_mut(lang) {
                            editor.set_value(html);
                        }
                    }
                }
                FieldController::MediaUpload(c) => c.sync_manual_mode(&mut self.values).await,
                _ => {}
            }
        }
    }

    /// Pick the media type of a media field that has a media-type selector.
    pub async fn select_media_type(&mut self, field: &str, kind: MediaKind) -> AppResult<()> {
        let type_field = match field_ref(&self.fields, field)? {
            FieldController::MediaUpload(c) => c.field().media_type_field.clone(),
            _ => return Err(wrong_kind(field, "media-upload")),
        };
        let type_field = type_field
            .ok_or_else(|| AppError::InvalidInput(format!("Field {} has no media type selector", field)))?;
        self.set_value(&type_field, Value::String(kind.as_str().to_string()))
            .await;
        Ok(())
    }

    /// Typed input into a text-like field. `name` is the value name, so
    /// multilingual inputs use e.g. `titleRu`.
    pub fn input(&mut self, name: &str, raw: &str) -> AppResult<()> {
        if let Some(controller) = self.fields.get(name) {
            match controller {
                FieldController::Simple(c) => c.set(&mut self.values, raw),
                FieldController::Select(c) => c.choose(&mut self.values, raw),
                _ => return Err(wrong_kind(name, "text input")),
            }
            return Ok(());
        }

        let (controller, lang) = multilingual_for(&self.fields, name)?;
        let FieldController::Multilingual(c) = controller else {
            return Err(wrong_kind(name, "multilingual"));
        };
        if c.is_editor() {
            return Err(wrong_kind(name, "text input"));
        }
        c.set_text(&mut self.values, lang, raw);
        Ok(())
    }

    /// Offer a new option list in a mounted select field.
    pub fn set_select_options(&mut self, name: &str, options: Vec<SelectOption>) -> AppResult<()> {
        match self.fields.get_mut(name) {
            Some(FieldController::Select(c)) => {
                c.set_options(options);
                Ok(())
            }
            Some(_) => Err(wrong_kind(name, "select")),
            None => Err(AppError::InvalidInput(format!("Unknown form field: {}", name))),
        }
    }

    pub fn toggle(&mut self, name: &str) -> AppResult<bool> {
        match field_ref(&self.fields, name)? {
            FieldController::Boolean(c) => Ok(c.toggle(&mut self.values)),
            _ => Err(wrong_kind(name, "boolean")),
        }
    }

    pub fn array_add(&mut self, name: &str, raw: &str) -> AppResult<()> {
        match field_ref(&self.fields, name)? {
            FieldController::Array(c) => c.add(&mut self.values, raw),
            _ => Err(wrong_kind(name, "array")),
        }
    }

    pub fn array_remove(&mut self, name: &str, index: usize) -> AppResult<bool> {
        match field_ref(&self.fields, name)? {
            FieldController::Array(c) => Ok(c.remove(&mut self.values, index)),
            _ => Err(wrong_kind(name, "array")),
        }
    }

    pub async fn select_files(&mut self, name: &str, files: Vec<MediaFile>) -> AppResult<SelectionOutcome> {
        match field_ref(&self.fields, name)? {
            FieldController::MediaUpload(c) => Ok(c.select_files(&mut self.values, files).await),
            _ => Err(wrong_kind(name, "media-upload")),
        }
    }

    pub async fn remove_media(&mut self, name: &str, url: &str) -> AppResult<()> {
        match field_ref(&self.fields, name)? {
            FieldController::MediaUpload(c) => {
                c.remove(&mut self.values, url).await;
                Ok(())
            }
            _ => Err(wrong_kind(name, "media-upload")),
        }
    }

    pub fn commit_manual_url(&mut self, name: &str, raw: &str) -> AppResult<()> {
        match field_ref(&self.fields, name)? {
            FieldController::MediaUpload(c) => c.commit_manual_url(&mut self.values, raw),
            _ => Err(wrong_kind(name, "media-upload")),
        }
    }

    pub fn media_counter(&self, name: &str) -> AppResult<Option<String>> {
        match field_ref(&self.fields, name)? {
            FieldController::MediaUpload(c) => Ok(c.counter(&self.values)),
            _ => Err(wrong_kind(name, "media-upload")),
        }
    }

    pub fn social_links(&self, name: &str) -> AppResult<Vec<SocialLink>> {
        match field_ref(&self.fields, name)? {
            FieldController::SocialLinks(c) => Ok(c.rows(&self.values)),
            _ => Err(wrong_kind(name, "social-links")),
        }
    }

    pub fn add_social_link(&mut self, name: &str) -> AppResult<()> {
        match field_ref(&self.fields, name)? {
            FieldController::SocialLinks(c) => {
                c.add_row(&mut self.values);
                Ok(())
            }
            _ => Err(wrong_kind(name, "social-links")),
        }
    }

    pub fn set_social_link(&mut self, name: &str, index: usize, link: &str) -> AppResult<()> {
        match field_ref(&self.fields, name)? {
            FieldController::SocialLinks(c) => c.set_link(&mut self.values, index, link),
            _ => Err(wrong_kind(name, "social-links")),
        }
    }

    pub async fn remove_social_link(&mut self, name: &str, index: usize) -> AppResult<()> {
        match field_ref(&self.fields, name)? {
            FieldController::SocialLinks(c) => c.remove_row(&mut self.values, index).await,
            _ => Err(wrong_kind(name, "social-links")),
        }
    }

    pub async fn upload_social_icon(&mut self, name: &str, index: usize, file: MediaFile) -> AppResult<String> {
        match field_ref(&self.fields, name)? {
            FieldController::SocialLinks(c) => c.upload_icon(&mut self.values, index, file).await,
            _ => Err(wrong_kind(name, "social-links")),
        }
    }

    /// Apply an operator edit to the editor showing `name` (e.g. `bodyUz`).
    pub async fn editor_edit(&mut self, name: &str, html: &str) -> AppResult<String> {
        let editor = editor_for(&mut self.fields, name)?;
        let value = editor.apply_user_edit(html).await;
        self.values.insert(name.to_string(), Value::String(value.clone()));
        Ok(value)
    }

    pub async fn editor_paste(
        &mut self,
        name: &str,
        clipboard: ClipboardPayload,
        cursor: Option<usize>,
    ) -> AppResult<Option<String>> {
        let editor = editor_for(&mut self.fields, name)?;
        let value = editor.paste(clipboard, cursor).await;
        self.store_editor_value(name, value.as_deref());
        Ok(value)
    }

    pub async fn editor_drop(
        &mut self,
        name: &str,
        files: Vec<MediaFile>,
        cursor: Option<usize>,
    ) -> AppResult<Option<String>> {
        let editor = editor_for(&mut self.fields, name)?;
        let value = editor.drop_files(files, cursor).await;
        self.store_editor_value(name, value.as_deref());
        Ok(value)
    }

    pub async fn editor_pick_file(
        &mut self,
        name: &str,
        file: MediaFile,
        embed: EmbedKind,
        cursor: Option<usize>,
    ) -> AppResult<Option<String>> {
        let editor = editor_for(&mut self.fields, name)?;
        let value = editor.pick_file_and_insert(file, embed, cursor).await;
        self.store_editor_value(name, value.as_deref());
        Ok(value)
    }

    pub async fn editor_insert_table(
        &mut self,
        name: &str,
        size_input: &str,
        cursor: Option<usize>,
    ) -> AppResult<Option<String>> {
        let editor = editor_for(&mut self.fields, name)?;
        let value = editor.insert_table(size_input, cursor).await;
        self.store_editor_value(name, value.as_deref());
        Ok(value)
    }

    fn store_editor_value(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.values
                .insert(name.to_string(), Value::String(value.to_string()));
        }
    }
}

fn field_ref<'a>(fields: &'a IndexMap<String, FieldController>, name: &str) -> AppResult<&'a FieldController> {
    fields
        .get(name)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown form field: {}", name)))
}

fn wrong_kind(name: &str, expected: &str) -> AppError {
    AppError::InvalidInput(format!("Field {} is not a {} field", name, expected))
}

fn multilingual_for<'a>(
    fields: &'a IndexMap<String, FieldController>,
    name: &str,
) -> AppResult<(&'a FieldController, Language)> {
    fields
        .values()
        .find_map(|controller| match controller {
            FieldController::Multilingual(c) => c.language_of(name).map(|lang| (controller, lang)),
            _ => None,
        })
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown form field: {}", name)))
}

fn editor_for<'a>(
    fields: &'a mut IndexMap<String, FieldController>,
    name: &str,
) -> AppResult<&'a mut RichTextEditor> {
    fields
        .values_mut()
        .find_map(|controller| match controller {
            FieldController::Multilingual(c) => {
                let lang = c.language_of(name)?;
                c.editor_mut(lang)
            }
            _ => None,
        })
        .ok_or_else(|| wrong_kind(name, "rich text"))
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{MediaUploadField, MultilingualField, MultilingualKind, UploadMode};
    use async_trait::async_trait;
    use fonon_core::{DeleteTarget, MemoryNotifier, UploadedMedia};
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Default)]
    struct FakeStore {
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MediaStore for FakeStore {
        async fn upload(&self, category: &str, file: MediaFile) -> AppResult<UploadedMedia> {
            Ok(UploadedMedia {
                url: format!("https://cdn.test/files/{}/{}", category, file.name),
                path: Some(format!("{}/{}", category, file.name)),
                raw_url: Some(format!("/files/{}/{}", category, file.name)),
            })
        }

        async fn delete(&self, target: &DeleteTarget) -> AppResult<()> {
            self.deleted
                .lock()
                .push(target.value().unwrap_or_default().to_string());
            Ok(())
        }

        fn resolve_url(&self, url: &str) -> String {
            url.to_string()
        }
    }

    fn descriptors() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::text("title", "Sarlavha").required(),
            FieldDescriptor::Multilingual(MultilingualField {
                base_name: "body".to_string(),
                label: "Matn".to_string(),
                kind: MultilingualKind::Editor,
                upload_category: Some("news".to_string()),
                ..Default::default()
            }),
            FieldDescriptor::MediaUpload(MediaUploadField {
                name: "url".to_string(),
                label: "Media".to_string(),
                upload_category: "gallery".to_string(),
                mode: UploadMode::Single,
                media_type_field: Some("mediaType".to_string()),
                manual_input_when: vec!["video".to_string()],
                ..Default::default()
            }),
            FieldDescriptor::boolean("active", "Faol"),
        ]
    }

    fn session(store: Arc<FakeStore>) -> FormSession {
        let mut session = FormSession::new(store, Arc::new(MemoryNotifier::new()));
        session.reset(
            json!({"title": "", "bodyUz": "", "mediaType": "image", "url": "", "active": true})
                .as_object()
                .cloned()
                .unwrap(),
        );
        session.mount(&descriptors());
        session
    }

    #[tokio::test]
    async fn test_mount_registers_media_bearing_fields() {
        let session = session(Arc::new(FakeStore::default()));
        // Three editors plus the media field.
        assert_eq!(session.registry().len(), 4);
        assert!(session.is_mounted());
    }

    #[tokio::test]
    async fn test_routes_inputs_to_controllers() {
        let mut session = session(Arc::new(FakeStore::default()));
        session.input("title", "Yangilik").unwrap();
        assert!(!session.toggle("active").unwrap());
        assert!(session.input("bodyUz", "<p>x</p>").is_err());
        assert!(session.toggle("title").is_err());
        assert!(session.input("missing", "x").is_err());

        let html = session.editor_edit("bodyUz", "<p>Salom</p>").await.unwrap();
        assert_eq!(html, "<p>Salom</p>");
        assert_eq!(session.value("bodyUz"), Some(&json!("<p>Salom</p>")));
        assert_eq!(session.value("title"), Some(&json!("Yangilik")));
    }

    #[tokio::test]
    async fn test_media_type_switch_clears_and_discards() {
        let store = Arc::new(FakeStore::default());
        let mut session = session(store.clone());
        session
            .select_files("url", vec![MediaFile::new("a.jpg", "image/jpeg", vec![1u8])])
            .await
            .unwrap();
        assert_eq!(session.value("url"), Some(&json!("/files/gallery/a.jpg")));

        session.select_media_type("url", MediaKind::Video).await.unwrap();

        assert_eq!(session.value("url"), Some(&json!("")));
        assert_eq!(*store.deleted.lock(), vec!["gallery/a.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_reset_updates_editors_silently() {
        let store = Arc::new(FakeStore::default());
        let mut session = session(store.clone());
        session.reset(
            json!({"bodyUz": "<p>Eski</p>", "mediaType": "video", "url": "https://www.youtube.com/embed/X"})
                .as_object()
                .cloned()
                .unwrap(),
        );
        // Resetting to a video record keeps its URL.
        assert_eq!(session.value("url"), Some(&json!("https://www.youtube.com/embed/X")));
        session.set_value("bodyUz", json!("<p>Yangi</p>")).await;
        assert_eq!(session.value("url"), Some(&json!("https://www.youtube.com/embed/X")));
        assert!(store.deleted.lock().is_empty());
    }

    #[tokio::test]
    async fn test_unmount_discards_uncommitted_uploads() {
        let store = Arc::new(FakeStore::default());
        let mut session = session(store.clone());
        session
            .editor_drop("bodyUz", vec![MediaFile::new("p.png", "image/png", vec![1u8])], None)
            .await
            .unwrap();

        session.unmount().await;

        assert_eq!(*store.deleted.lock(), vec!["news/p.png".to_string()]);
        assert!(session.registry().is_empty());
        assert!(!session.is_mounted());
    }

    #[test]
    fn test_set_errors_keeps_first_message_per_path() {
        let mut session = FormSession::new(Arc::new(FakeStore::default()), Arc::new(MemoryNotifier::new()));
        session.set_errors(&[
            FieldIssue::new("titleUz", "Majburiy"),
            FieldIssue::new("titleUz", "Boshqa"),
            FieldIssue::root("Xato"),
        ]);
        assert_eq!(session.error("titleUz"), Some("Majburiy"));
        assert_eq!(session.error("root"), Some("Xato"));
    }
}
