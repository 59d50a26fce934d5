//! Generic resource page
//!
//! [`ResourcePage`] is the headless counterpart of a CRUD screen: a cached
//! record list, a create/edit dialog backed by a [`FormSession`], a delete
//! confirmation and, for media resources, a preview dialog. Everything a
//! resource needs beyond that comes from its [`ResourceConfig`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use fonon_core::{log_error, AppError, AppResult, ErrorMetadata, MediaStore, Notice, Notifier, Record, ResourceService};

use crate::form::FormSession;
use crate::preview::{has_preview_media, PreviewMedia};
use crate::resources::{ResourceConfig, ResourceKey};
use crate::values::{record_id, sanitize_payload};

const VALIDATION_FAILED_TITLE: &str = "Maʼlumotlarni tekshiring";
const SAVE_FAILED_TITLE: &str = "Saqlashda xatolik";
const DELETE_FAILED_TITLE: &str = "O‘chirishda xatolik";
const MEDIA_MISSING_TITLE: &str = "Media topilmadi";

/// Result of a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

impl SaveOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            SaveOutcome::Created => "Yaratildi",
            SaveOutcome::Updated => "Yangilandi",
        }
    }
}

pub struct ResourcePage {
    config: &'static ResourceConfig,
    service: Arc<dyn ResourceService>,
    related: HashMap<ResourceKey, Arc<dyn ResourceService>>,
    store: Arc<dyn MediaStore>,
    notifier: Arc<dyn Notifier>,
    records: Option<Vec<Record>>,
    form: FormSession,
    dialog_open: bool,
    editing: Option<Record>,
    pending_delete: Option<Record>,
    preview: Option<PreviewMedia>,
}

impl ResourcePage {
    pub fn new(
        config: &'static ResourceConfig,
        service: Arc<dyn ResourceService>,
        store: Arc<dyn MediaStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let form = FormSession::new(Arc::clone(&store), Arc::clone(&notifier));
        Self {
            config,
            service,
            related: HashMap::new(),
            store,
            notifier,
            records: None,
            form,
            dialog_open: false,
            editing: None,
            pending_delete: None,
            preview: None,
        }
    }

    /// Service listing the records of a resource that fills one of this
    /// resource's selects.
    pub fn with_related(mut self, key: ResourceKey, service: Arc<dyn ResourceService>) -> Self {
        self.related.insert(key, service);
        self
    }

    pub fn config(&self) -> &'static ResourceConfig {
        self.config
    }

    pub fn query_key(&self) -> [&'static str; 2] {
        self.config.query_key()
    }

    /// Records of the resource, fetched on first use and cached until a
    /// mutation invalidates them.
    pub async fn records(&mut self) -> AppResult<&[Record]> {
        if self.records.is_none() {
            let key = self.query_key();
            tracing::debug!(query_key = ?key, "Fetching resource list");
            let records = self.service.list().await?;
            tracing::debug!(query_key = ?key, count = records.len(), "Resource list loaded");
            self.records = Some(records);
        }
        Ok(self.records.as_deref().unwrap_or_default())
    }

    pub fn cached_records(&self) -> Option<&[Record]> {
        self.records.as_deref()
    }

    pub fn invalidate(&mut self) {
        self.records = None;
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.config.headers()
    }

    pub async fn rows(&mut self) -> AppResult<Vec<Vec<String>>> {
        let config = self.config;
        let records = self.records().await?;
        Ok(config.render_rows(records))
    }

    pub fn form(&self) -> &FormSession {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormSession {
        &mut self.form
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn editing_record(&self) -> Option<&Record> {
        self.editing.as_ref()
    }

    pub fn dialog_title(&self) -> String {
        let action = if self.editing.is_some() {
            "Tahrirlash"
        } else {
            "Yangi yozuv"
        };
        format!("{} – {}", action, self.config.title)
    }

    /// Whether the dialog should take the full screen.
    pub fn is_full_screen(&self) -> bool {
        self.config.has_editor_field()
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.open_dialog(self.config.form_values_for(None));
    }

    /// Open the create dialog with the parent field preset to `parent`.
    pub fn open_create_child(&mut self, parent: &Record) -> AppResult<()> {
        let Some(field) = self.config.parent_field else {
            return Err(AppError::InvalidInput(format!("{} records do not nest", self.config.key)));
        };
        let parent_id =
            record_id(parent).ok_or_else(|| AppError::InvalidInput("Parent record has no id".to_string()))?;
        self.editing = None;
        let mut values = self.config.form_values_for(None);
        values.insert(field.to_string(), parent_id.into());
        self.open_dialog(values);
        Ok(())
    }

    pub fn open_edit(&mut self, record: Record) {
        let values = self.config.form_values_for(Some(&record));
        self.editing = Some(record);
        self.open_dialog(values);
    }

    fn open_dialog(&mut self, values: Record) {
        self.form.reset(values);
        self.form.mount(&self.config.fields);
        self.dialog_open = true;
    }

    /// Fill the open form's selects from the records they point at. A record
    /// being edited is never offered as its own parent or under its subtree.
    pub async fn load_options(&mut self) -> AppResult<()> {
        let config = self.config;
        for source in &config.option_sources {
            let own = source.resource == config.key;
            let records = if own {
                self.records().await?.to_vec()
            } else {
                let service = self.related.get(&source.resource).cloned().ok_or_else(|| {
                    AppError::Config(format!("No service registered for {}", source.resource))
                })?;
                service.list().await?
            };
            let excluded = match self.editing.as_ref() {
                Some(editing) if own => source.excluded_for(&records, editing),
                _ => HashSet::new(),
            };
            let options = source.options(&records, &excluded);
            tracing::debug!(
                resource = %config.key,
                field = source.field,
                options = options.len(),
                "Select options loaded"
            );
            self.form.set_select_options(source.field, options)?;
        }
        Ok(())
    }

    /// Validate, convert and save the form.
    ///
    /// Validation failures mark the offending paths and leave the dialog open.
    /// A rejected mutation is reported and also leaves the dialog open with
    /// its values intact. On success the session's uploads are committed.
    pub async fn submit(&mut self) -> AppResult<SaveOutcome> {
        let parsed = match self.config.schema.parse(self.form.values()) {
            Ok(parsed) => parsed,
            Err(issues) => {
                self.form.set_errors(&issues);
                self.notifier.notify(Notice::error(VALIDATION_FAILED_TITLE, None));
                tracing::debug!(resource = %self.config.key, issues = issues.len(), "Form rejected");
                return Err(AppError::Validation(issues));
            }
        };
        self.form.clear_errors();

        let sanitized = sanitize_payload(parsed);
        let payload = match self.config.to_payload {
            Some(convert) => convert(&sanitized, self.editing.as_ref()),
            None => sanitized,
        };

        let result = match self.editing.as_ref().and_then(record_id) {
            Some(id) => self.service.update(id, payload).await.map(|_| SaveOutcome::Updated),
            None => self.service.create(payload).await.map(|_| SaveOutcome::Created),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::info_span!("save", resource = %self.config.key).in_scope(|| log_error(&err, "Save"));
                self.notifier
                    .notify(Notice::error(SAVE_FAILED_TITLE, Some(err.client_message())));
                return Err(err);
            }
        };

        tracing::info!(resource = %self.config.key, outcome = outcome.label(), "Record saved");
        self.notifier
            .notify(Notice::success(format!("{}: {}", self.config.title, outcome.label())));
        self.form.registry().commit_all();
        self.dialog_open = false;
        self.finalize_close().await;
        self.invalidate();
        Ok(outcome)
    }

    /// Close the dialog, deleting every file uploaded during the session.
    pub async fn cancel(&mut self) {
        self.dialog_open = false;
        self.form.registry().discard_all().await;
        self.finalize_close().await;
    }

    async fn finalize_close(&mut self) {
        self.editing = None;
        self.form.unmount().await;
        self.form.reset(self.config.form_values_for(None));
    }

    pub fn request_delete(&mut self, record: Record) {
        self.pending_delete = Some(record);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&Record> {
        self.pending_delete.as_ref()
    }

    /// Delete the record awaiting confirmation. The confirmation closes
    /// whatever the outcome; records without an id are ignored.
    pub async fn confirm_delete(&mut self) -> AppResult<()> {
        let Some(record) = self.pending_delete.take() else {
            return Ok(());
        };
        let Some(id) = record_id(&record) else {
            return Ok(());
        };

        match self.service.remove(id).await {
            Ok(()) => {
                tracing::info!(resource = %self.config.key, id, "Record deleted");
                self.notifier
                    .notify(Notice::success(format!("{}: O‘chirildi", self.config.title)));
                self.invalidate();
                Ok(())
            }
            Err(err) => {
                tracing::info_span!("delete", resource = %self.config.key, id)
                    .in_scope(|| log_error(&err, "Delete"));
                self.notifier
                    .notify(Notice::error(DELETE_FAILED_TITLE, Some(err.client_message())));
                Err(err)
            }
        }
    }

    pub fn has_preview_column(&self) -> bool {
        self.config.preview.is_some()
    }

    /// Whether a row shows a preview button.
    pub fn can_preview(&self, record: &Record) -> bool {
        self.config
            .preview
            .is_some_and(|source| has_preview_media(source, record))
    }

    pub fn open_preview(&mut self, record: &Record) -> Option<&PreviewMedia> {
        match PreviewMedia::from_record(record, self.store.as_ref()) {
            Some(media) => {
                self.preview = Some(media);
                self.preview.as_ref()
            }
            None => {
                self.notifier.notify(Notice::error(MEDIA_MISSING_TITLE, None));
                None
            }
        }
    }

    pub fn preview(&self) -> Option<&PreviewMedia> {
        self.preview.as_ref()
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }
}

impl std::fmt::Debug for ResourcePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourcePage")
            .field("resource", &self.config.key)
            .field("dialog_open", &self.dialog_open)
            .field("editing", &self.editing.as_ref().and_then(record_id))
            .field("cached", &self.records.as_ref().map(Vec::len))
            .finish()
    }
}
