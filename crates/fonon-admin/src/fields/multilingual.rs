//! Multilingual field: one value per language (`titleUz`, `titleRu`,
//! `titleEn`), edited as plain inputs or as one rich text editor per language.

use std::sync::Arc;

use fonon_core::{MediaStore, Notifier, Record};
use serde_json::Value;

use super::descriptor::{Language, MultilingualField, MultilingualKind};
use crate::editor::RichTextEditor;
use crate::uploads::UploadRegistry;
use crate::values::get_str;

pub struct MultilingualController {
    field: MultilingualField,
    editors: Vec<(Language, RichTextEditor)>,
}

impl MultilingualController {
    pub fn mount(
        field: MultilingualField,
        values: &Record,
        registry: &UploadRegistry,
        store: Arc<dyn MediaStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let editors = if field.kind == MultilingualKind::Editor {
            Language::ALL
                .iter()
                .map(|lang| {
                    let name = lang.field_name(&field.base_name);
                    let editor = RichTextEditor::mount(
                        get_str(values, &name).unwrap_or_default(),
                        field.upload_category.as_deref(),
                        registry,
                        store.clone(),
                        notifier.clone(),
                    );
                    (*lang, editor)
                })
                .collect()
        } else {
            Vec::new()
        };

        Self { field, editors }
    }

    pub fn field(&self) -> &MultilingualField {
        &self.field
    }

    pub fn is_editor(&self) -> bool {
        self.field.kind == MultilingualKind::Editor
    }

    /// Language whose value is stored under `name`, if `name` belongs here.
    pub fn language_of(&self, name: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.field_name(&self.field.base_name) == name)
    }

    /// Whether the value for `lang` is mandatory: only Uzbek ever is.
    pub fn is_required(&self, lang: Language) -> bool {
        self.field.required && lang == Language::Uz
    }

    pub fn set_text(&self, values: &mut Record, lang: Language, text: &str) {
        values.insert(
            lang.field_name(&self.field.base_name),
            Value::String(text.to_string()),
        );
    }

    pub fn editor(&self, lang: Language) -> Option<&RichTextEditor> {
        self.editors
            .iter()
            .find(|(l, _)| *l == lang)
            .map(|(_, editor)| editor)
    }

    pub fn editor_mut(&mut self, lang: Language) -> Option<&mut RichTextEditor> {
        self.editors
            .iter_mut()
            .find(|(l, _)| *l == lang)
            .map(|(_, editor)| editor)
    }

    /// Push form values into the editors without emitting anything.
    pub fn sync_from_values(&mut self, values: &Record) {
        let base_name = self.field.base_name.clone();
        for (lang, editor) in &mut self.editors {
            let name = lang.field_name(&base_name);
            editor.set_value(get_str(values, &name).unwrap_or_default());
        }
    }

    pub async fn unmount(self) {
        for (_, editor) in self.editors {
            editor.unmount().await;
        }
    }
}

impl std::fmt::Debug for MultilingualController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultilingualController")
            .field("base_name", &self.field.base_name)
            .field("kind", &self.field.kind)
            .field("editors", &self.editors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fonon_core::{AppResult, DeleteTarget, MediaFile, MemoryNotifier, UploadedMedia};

    struct NoopStore;

    #[async_trait]
    impl MediaStore for NoopStore {
        async fn upload(&self, _category: &str, file: MediaFile) -> AppResult<UploadedMedia> {
            Ok(UploadedMedia {
                url: format!("https://cdn.test/{}", file.name),
                path: None,
                raw_url: None,
            })
        }

        async fn delete(&self, _target: &DeleteTarget) -> AppResult<()> {
            Ok(())
        }

        fn resolve_url(&self, url: &str) -> String {
            url.to_string()
        }
    }

    fn field(kind: MultilingualKind) -> MultilingualField {
        MultilingualField {
            base_name: "body".to_string(),
            label: "Matn".to_string(),
            required: true,
            kind,
            upload_category: Some("about".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_editor_kind_mounts_one_editor_per_language() {
        let registry = UploadRegistry::new();
        let values = serde_json::json!({"bodyRu": "<p>Привет</p>"})
            .as_object()
            .cloned()
            .unwrap();
        let controller = MultilingualController::mount(
            field(MultilingualKind::Editor),
            &values,
            &registry,
            Arc::new(NoopStore),
            Arc::new(MemoryNotifier::new()),
        );

        assert_eq!(registry.len(), 3);
        assert_eq!(controller.editor(Language::Ru).unwrap().html(), "<p>Привет</p>");
        assert_eq!(controller.editor(Language::Uz).unwrap().category(), "about");
        assert_eq!(controller.language_of("bodyEn"), Some(Language::En));
        assert_eq!(controller.language_of("titleEn"), None);
        assert!(controller.is_required(Language::Uz));
        assert!(!controller.is_required(Language::Ru));
    }

    #[test]
    fn test_text_kind_sets_language_value() {
        let registry = UploadRegistry::new();
        let controller = MultilingualController::mount(
            field(MultilingualKind::Textarea),
            &Record::new(),
            &registry,
            Arc::new(NoopStore),
            Arc::new(MemoryNotifier::new()),
        );
        assert!(registry.is_empty());

        let mut values = Record::new();
        controller.set_text(&mut values, Language::En, "Hello");
        assert_eq!(values["bodyEn"], "Hello");
    }
}
