//! Rich text editor adapter
//!
//! Holds an HTML document for one form value. Programmatic updates are
//! silent; user edits are sanitised, emitted to the form and followed by a
//! cleanup pass that deletes uploads no longer referenced by the document.
//! Files pasted, dropped or picked from the toolbar are uploaded and embedded
//! at the cursor, and tracked as pending until the form is saved.

pub mod formats;
pub mod html;
pub mod table;

use std::sync::Arc;

use fonon_core::{log_error, AppError, AppResult, ErrorMetadata, MediaFile, MediaStore, Notice, Notifier};
use futures::future::join_all;

use crate::uploads::{PendingUploads, Registration, UploadRegistry};
pub use formats::{embed_formats, EmbedKind, EmbedValue};
pub use html::sanitize_html;
pub use table::{parse_table_size, DEFAULT_TABLE_SIZE};

pub const DEFAULT_UPLOAD_CATEGORY: &str = "general";

/// File filter for the toolbar image button.
pub const PICK_IMAGE_ACCEPT: &str = "image/*";

/// File filter for the toolbar video button.
pub const PICK_VIDEO_ACCEPT: &str = "video/*,audio/*";

const UPLOAD_FAILED_TITLE: &str = "Faylni yuklashda xatolik";
const DELETE_FAILED_TITLE: &str = "Faylni o'chirishda xatolik";

/// Files and text carried by a paste event.
#[derive(Debug, Clone, Default)]
pub struct ClipboardPayload {
    pub files: Vec<MediaFile>,
    pub plain_text: Option<String>,
}

impl ClipboardPayload {
    /// Pastes without files are left to the default clipboard handling.
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

pub struct RichTextEditor {
    html: String,
    last_html: String,
    category: String,
    uploads: Arc<PendingUploads>,
    notifier: Arc<dyn Notifier>,
    _registration: Registration,
}

impl RichTextEditor {
    /// Create an editor seeded with `initial` and register its uploads.
    pub fn mount(
        initial: &str,
        upload_category: Option<&str>,
        registry: &UploadRegistry,
        store: Arc<dyn MediaStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        // Formats must exist before the first document is rendered.
        let _ = embed_formats();

        let category = upload_category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_CATEGORY)
            .to_string();
        let uploads = Arc::new(PendingUploads::new(
            store,
            notifier.clone(),
            DELETE_FAILED_TITLE,
        ));
        let registration = registry.register(uploads.clone());

        let initial = sanitize_html(initial);
        Self {
            html: initial.clone(),
            last_html: initial,
            category,
            uploads,
            notifier,
            _registration: registration,
        }
    }

    /// Current document as last emitted or set.
    pub fn html(&self) -> &str {
        &self.last_html
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn pending_uploads(&self) -> &Arc<PendingUploads> {
        &self.uploads
    }

    /// Replace the document from the outside. Emits nothing and deletes
    /// nothing; a value equal to the current document is ignored.
    pub fn set_value(&mut self, value: &str) {
        let sanitized = sanitize_html(value);
        if sanitized == self.last_html {
            return;
        }
        self.html = sanitized.clone();
        self.last_html = sanitized;
    }

    /// Apply a document change made by the operator and return the value to
    /// store in the form.
    ///
    /// Pending uploads whose URL no longer occurs in the document are deleted.
    pub async fn apply_user_edit(&mut self, html: &str) -> String {
        self.html = html.to_string();
        let sanitized = sanitize_html(html);
        self.last_html = sanitized.clone();
        self.cleanup_removed_uploads(&sanitized).await;
        sanitized
    }

    /// Upload pasted files, embed them at the cursor and append the pasted
    /// text after them. Returns the new value when the document changed.
    pub async fn paste(
        &mut self,
        clipboard: ClipboardPayload,
        cursor: Option<usize>,
    ) -> Option<String> {
        if !clipboard.has_files() {
            return None;
        }

        let offset = self.resolve_cursor(cursor);
        let (mut doc, offset, mut changed) = self.insert_files(clipboard.files, offset).await;

        if let Some(text) = clipboard.plain_text.filter(|t| !t.trim().is_empty()) {
            doc.insert_str(offset, &html::text_paragraphs(&text));
            changed = true;
        }

        if !changed {
            return None;
        }
        Some(self.apply_user_edit(&doc).await)
    }

    /// Upload dropped files and embed them at the cursor.
    pub async fn drop_files(&mut self, files: Vec<MediaFile>, cursor: Option<usize>) -> Option<String> {
        if files.is_empty() {
            return None;
        }
        let offset = self.resolve_cursor(cursor);
        let (doc, _, changed) = self.insert_files(files, offset).await;
        if !changed {
            return None;
        }
        Some(self.apply_user_edit(&doc).await)
    }

    /// Toolbar picker: upload one file and embed it as `embed`, unless its
    /// MIME type says it is an image or audio clip.
    pub async fn pick_file_and_insert(
        &mut self,
        file: MediaFile,
        embed: EmbedKind,
        cursor: Option<usize>,
    ) -> Option<String> {
        let kind = if embed == EmbedKind::Image || file.is_image() {
            EmbedKind::Image
        } else if file.is_audio() {
            EmbedKind::Audio
        } else {
            EmbedKind::Video
        };

        let offset = self.resolve_cursor(cursor);
        let name = file.name.clone();
        let url = match self.upload_file(file).await {
            Ok(url) => url,
            Err(err) => {
                self.report_upload_failure(&err);
                return None;
            }
        };

        let mut doc = self.html.clone();
        doc.insert_str(offset, &render_embed(kind, &url, &name));
        Some(self.apply_user_edit(&doc).await)
    }

    /// Insert an empty table sized from a prompt answer such as `3x4`.
    /// Unparseable answers leave the document alone.
    pub async fn insert_table(&mut self, size_input: &str, cursor: Option<usize>) -> Option<String> {
        let (rows, columns) = parse_table_size(size_input)?;
        let offset = self.resolve_cursor(cursor);
        let mut doc = self.html.clone();
        doc.insert_str(offset, &table::table_html(rows, columns));
        Some(self.apply_user_edit(&doc).await)
    }

    /// Tear the editor down. Uploads that were never committed are deleted.
    pub async fn unmount(self) {
        self.uploads.release().await;
    }

    async fn insert_files(&self, files: Vec<MediaFile>, mut offset: usize) -> (String, usize, bool) {
        let mut doc = self.html.clone();
        let mut changed = false;

        for file in files {
            let kind = EmbedKind::for_content_type(&file.content_type);
            let name = file.name.clone();
            match self.upload_file(file).await {
                Ok(url) => {
                    let snippet = render_embed(kind, &url, &name);
                    doc.insert_str(offset, &snippet);
                    offset += snippet.len();
                    changed = true;
                }
                Err(err) => self.report_upload_failure(&err),
            }
        }

        (doc, offset, changed)
    }

    async fn upload_file(&self, file: MediaFile) -> AppResult<String> {
        let media = self.uploads.store().upload(&self.category, file).await?;
        if media.url.is_empty() {
            return Err(AppError::UploadFailed(
                "Fayl yuklashda xatolik yuz berdi".to_string(),
            ));
        }
        let url = media.url.clone();
        self.uploads.track(url.clone(), media).await;
        Ok(url)
    }

    fn report_upload_failure(&self, err: &AppError) {
        tracing::info_span!("editor_upload", category = %self.category)
            .in_scope(|| log_error(err, "Editor upload"));
        self.notifier
            .notify(Notice::error(UPLOAD_FAILED_TITLE, Some(err.client_message())));
    }

    async fn cleanup_removed_uploads(&self, html: &str) {
        let referenced = html::referenced_urls(html);
        let removed: Vec<String> = self
            .uploads
            .keys()
            .into_iter()
            .filter(|url| !referenced.contains(url))
            .collect();
        if removed.is_empty() {
            return;
        }
        tracing::debug!(count = removed.len(), "Deleting uploads removed from editor content");
        join_all(removed.iter().map(|url| self.uploads.remove_and_delete(url))).await;
    }

    fn resolve_cursor(&self, cursor: Option<usize>) -> usize {
        match cursor {
            Some(offset) if html::is_insertion_point(&self.html, offset) => offset,
            _ => self.html.len(),
        }
    }
}

fn render_embed(kind: EmbedKind, url: &str, file_name: &str) -> String {
    let title = (kind == EmbedKind::Audio).then_some(file_name);
    embed_formats().render(kind, &EmbedValue { src: url, title })
}

impl std::fmt::Debug for RichTextEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichTextEditor")
            .field("html", &self.last_html)
            .field("category", &self.category)
            .field("pending", &self.uploads.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fonon_core::{DeleteTarget, MemoryNotifier, UploadedMedia};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeStore {
        counter: AtomicUsize,
        deleted: Mutex<Vec<String>>,
        categories: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MediaStore for FakeStore {
        async fn upload(&self, category: &str, file: MediaFile) -> AppResult<UploadedMedia> {
            if file.name.starts_with("broken") {
                return Err(AppError::UploadFailed("disk full".to_string()));
            }
            let n = self.counter.fetch_add(1, Ordering::SeqCst);
            self.categories.lock().push(category.to_string());
            Ok(UploadedMedia {
                url: format!("https://cdn.test/{}/{}-{}", category, n, file.name),
                path: Some(format!("{}/{}-{}", category, n, file.name)),
                raw_url: None,
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

    fn editor(store: Arc<FakeStore>, notifier: Arc<MemoryNotifier>) -> (RichTextEditor, UploadRegistry) {
        let registry = UploadRegistry::new();
        let editor = RichTextEditor::mount("", Some("  "), &registry, store, notifier);
        (editor, registry)
    }

    fn image(name: &str) -> MediaFile {
        MediaFile::new(name, "image/png", vec![1u8, 2, 3])
    }

    #[tokio::test]
    async fn test_blank_category_defaults_to_general() {
        let (editor, registry) = editor(Arc::new(FakeStore::default()), Arc::new(MemoryNotifier::new()));
        assert_eq!(editor.category(), "general");
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_set_value_is_silent() {
        let store = Arc::new(FakeStore::default());
        let (mut editor, _registry) = editor(store.clone(), Arc::new(MemoryNotifier::new()));
        editor.set_value("<p><br></p>");
        assert_eq!(editor.html(), "");
        editor.set_value("<p>Salom</p>");
        assert_eq!(editor.html(), "<p>Salom</p>");
        assert!(store.deleted.lock().is_empty());
    }

    #[tokio::test]
    async fn test_removing_one_of_three_images_deletes_it() {
        let store = Arc::new(FakeStore::default());
        let (mut editor, _registry) = editor(store.clone(), Arc::new(MemoryNotifier::new()));

        let html = editor
            .drop_files(vec![image("a.png"), image("b.png"), image("c.png")], None)
            .await
            .unwrap();
        assert_eq!(html.matches("<img").count(), 3);
        assert_eq!(editor.pending_uploads().len(), 3);

        let removed = "https://cdn.test/general/1-b.png";
        let edited = html.replace(&format!(r#"<p><img src="{}"></p>"#, removed), "");
        editor.apply_user_edit(&edited).await;

        assert_eq!(*store.deleted.lock(), vec!["general/1-b.png".to_string()]);
        assert_eq!(editor.pending_uploads().len(), 2);
    }

    struct SignedStore {
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MediaStore for SignedStore {
        async fn upload(&self, _category: &str, file: MediaFile) -> AppResult<UploadedMedia> {
            Ok(UploadedMedia {
                url: format!("https://cdn.test/{}?v=1&sig=abc", file.name),
                path: Some(file.name),
                raw_url: None,
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

    #[tokio::test]
    async fn test_signed_upload_url_stays_while_embedded() {
        let store = Arc::new(SignedStore {
            deleted: Mutex::new(Vec::new()),
        });
        let registry = UploadRegistry::new();
        let mut editor = RichTextEditor::mount("", None, &registry, store.clone(), Arc::new(MemoryNotifier::new()));

        let html = editor.drop_files(vec![image("a.png"), image("a.png.bak")], None).await.unwrap();
        assert!(html.contains(r#"src="https://cdn.test/a.png?v=1&amp;sig=abc""#));
        assert!(store.deleted.lock().is_empty());
        assert_eq!(editor.pending_uploads().len(), 2);

        // Dropping the .bak embed must not take its prefix sibling with it.
        let kept = r#"<p><img src="https://cdn.test/a.png?v=1&amp;sig=abc"></p>"#;
        editor.apply_user_edit(kept).await;
        assert_eq!(*store.deleted.lock(), vec!["a.png.bak".to_string()]);
        assert_eq!(editor.pending_uploads().len(), 1);
    }

    #[tokio::test]
    async fn test_paste_inserts_files_then_text() {
        let store = Arc::new(FakeStore::default());
        let notifier = Arc::new(MemoryNotifier::new());
        let (mut editor, _registry) = editor(store.clone(), notifier.clone());
        editor.set_value("<p>Intro</p>");

        let html = editor
            .paste(
                ClipboardPayload {
                    files: vec![image("a.png"), image("broken.png")],
                    plain_text: Some("caption".to_string()),
                },
                Some(0),
            )
            .await
            .unwrap();

        assert!(html.starts_with(r#"<p><img src="https://cdn.test/general/0-a.png"></p><p>caption</p>"#));
        assert!(html.ends_with("<p>Intro</p>"));
        assert_eq!(notifier.errors().len(), 1);
        assert_eq!(notifier.errors()[0].title, "Faylni yuklashda xatolik");
    }

    #[tokio::test]
    async fn test_paste_without_files_is_not_handled() {
        let (mut editor, _registry) = editor(Arc::new(FakeStore::default()), Arc::new(MemoryNotifier::new()));
        let outcome = editor
            .paste(
                ClipboardPayload {
                    files: Vec::new(),
                    plain_text: Some("text".to_string()),
                },
                None,
            )
            .await;
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn test_pick_audio_uses_audio_embed() {
        let (mut editor, _registry) = editor(Arc::new(FakeStore::default()), Arc::new(MemoryNotifier::new()));
        let html = editor
            .pick_file_and_insert(MediaFile::new("kuy.mp3", "audio/mpeg", vec![0u8]), EmbedKind::Video, None)
            .await
            .unwrap();
        assert!(html.contains(r#"<audio class="ql-audio""#));
        assert!(html.contains(r#"title="kuy.mp3""#));
    }

    #[tokio::test]
    async fn test_insert_table() {
        let (mut editor, _registry) = editor(Arc::new(FakeStore::default()), Arc::new(MemoryNotifier::new()));
        assert!(editor.insert_table("nope", None).await.is_none());
        let html = editor.insert_table("2x2", None).await.unwrap();
        assert_eq!(html.matches("<td>").count(), 4);
    }

    #[tokio::test]
    async fn test_unmount_discards_uncommitted_uploads() {
        let store = Arc::new(FakeStore::default());
        let (mut editor, registry) = editor(store.clone(), Arc::new(MemoryNotifier::new()));
        editor.drop_files(vec![image("a.png")], None).await.unwrap();

        editor.unmount().await;

        assert_eq!(store.deleted.lock().len(), 1);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_unmount_after_commit_keeps_uploads() {
        let store = Arc::new(FakeStore::default());
        let (mut editor, registry) = editor(store.clone(), Arc::new(MemoryNotifier::new()));
        editor.drop_files(vec![image("a.png")], None).await.unwrap();

        registry.commit_all();
        editor.unmount().await;

        assert!(store.deleted.lock().is_empty());
    }
}
