//! Per-field tracker of uploads that are not yet saved
//!
//! A [`PendingUploads`] remembers which files a field uploaded during the
//! current form session, keyed by the value written into the form. Removing a
//! value deletes its file only when it is still pending here; files that came
//! from the saved record are never deleted by the form.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use fonon_core::{log_error, ErrorMetadata, MediaStore, Notice, Notifier, UploadedMedia};
use futures::future::join_all;
use indexmap::IndexMap;
use parking_lot::Mutex;

use super::registry::UploadHandle;

pub struct PendingUploads {
    store: Arc<dyn MediaStore>,
    notifier: Arc<dyn Notifier>,
    entries: Mutex<IndexMap<String, UploadedMedia>>,
    released: AtomicBool,
    failure_title: &'static str,
}

impl PendingUploads {
    /// `failure_title` is the notice title used when a delete fails.
    pub fn new(
        store: Arc<dyn MediaStore>,
        notifier: Arc<dyn Notifier>,
        failure_title: &'static str,
    ) -> Self {
        Self {
            store,
            notifier,
            entries: Mutex::new(IndexMap::new()),
            released: AtomicBool::new(false),
            failure_title,
        }
    }

    pub fn store(&self) -> &Arc<dyn MediaStore> {
        &self.store
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Remember an upload under the value the field stores for it.
    ///
    /// When the owning field is already gone the upload can no longer be
    /// referenced, so it is deleted right away instead.
    pub async fn track(&self, key: impl Into<String>, media: UploadedMedia) {
        let key = key.into();
        if self.released.load(Ordering::SeqCst) {
            tracing::debug!(key = %key, "Upload finished after release, deleting");
            self.delete(&media).await;
            return;
        }
        self.entries.lock().insert(key, media);
    }

    /// Stop tracking a value without deleting its file.
    pub fn forget(&self, key: &str) -> Option<UploadedMedia> {
        self.entries.lock().shift_remove(key)
    }

    /// Stop tracking everything without deleting.
    pub fn forget_all(&self) {
        self.entries.lock().clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Delete the file behind `key` when it is pending; returns whether a
    /// delete was attempted.
    pub async fn remove_and_delete(&self, key: &str) -> bool {
        let Some(media) = self.forget(key) else {
            return false;
        };
        self.delete(&media).await;
        true
    }

    /// Delete every pending upload concurrently and forget them all.
    pub async fn discard(&self) {
        let drained: Vec<UploadedMedia> = self.entries.lock().drain(..).map(|(_, m)| m).collect();
        if drained.is_empty() {
            return;
        }
        tracing::debug!(count = drained.len(), "Discarding field uploads");
        join_all(drained.iter().map(|media| self.delete(media))).await;
    }

    /// Keep every pending upload: forget them without deleting.
    pub fn commit(&self) {
        let count = {
            let mut entries = self.entries.lock();
            let count = entries.len();
            entries.clear();
            count
        };
        if count > 0 {
            tracing::debug!(count, "Committed field uploads");
        }
    }

    /// Called when the owning field unmounts: anything still pending was never
    /// saved and is discarded, as is every upload that completes afterwards.
    pub async fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
        self.discard().await;
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    async fn delete(&self, media: &UploadedMedia) {
        let target = media.delete_target();
        if let Err(err) = self.store.delete(&target).await {
            tracing::info_span!("pending_upload", url = %media.url)
                .in_scope(|| log_error(&err, "Pending upload delete"));
            self.notifier
                .notify(Notice::error(self.failure_title, Some(err.client_message())));
        }
    }
}

#[async_trait]
impl UploadHandle for PendingUploads {
    async fn discard_uploads(&self) {
        self.discard().await;
    }

    fn commit_uploads(&self) {
        self.commit();
    }
}

impl std::fmt::Debug for PendingUploads {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingUploads")
            .field("entries", &self.keys())
            .field("released", &self.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fonon_core::{AppError, AppResult, DeleteTarget, MediaFile, MemoryNotifier};

    #[derive(Default)]
    struct RecordingStore {
        deleted: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl MediaStore for RecordingStore {
        async fn upload(&self, _category: &str, _file: MediaFile) -> AppResult<UploadedMedia> {
            Err(AppError::UploadFailed("not used".to_string()))
        }

        async fn delete(&self, target: &DeleteTarget) -> AppResult<()> {
            let value = target.value().unwrap_or_default().to_string();
            if self.fail_on.as_deref() == Some(value.as_str()) {
                return Err(AppError::DeleteFailed("boom".to_string()));
            }
            self.deleted.lock().push(value);
            Ok(())
        }

        fn resolve_url(&self, url: &str) -> String {
            url.to_string()
        }
    }

    fn media(name: &str) -> UploadedMedia {
        UploadedMedia {
            url: format!("https://cdn.test/{}", name),
            path: Some(name.to_string()),
            raw_url: Some(format!("/files/{}", name)),
        }
    }

    fn tracker(store: Arc<RecordingStore>, notifier: Arc<MemoryNotifier>) -> PendingUploads {
        PendingUploads::new(store, notifier, "Media o‘chirishda xatolik")
    }

    #[tokio::test]
    async fn test_remove_and_delete_only_when_pending() {
        let store = Arc::new(RecordingStore::default());
        let pending = tracker(store.clone(), Arc::new(MemoryNotifier::new()));
        pending.track("/files/a.png", media("a.png")).await;

        assert!(!pending.remove_and_delete("/files/existing.png").await);
        assert!(pending.remove_and_delete("/files/a.png").await);
        assert!(!pending.remove_and_delete("/files/a.png").await);

        assert_eq!(*store.deleted.lock(), vec!["a.png".to_string()]);
    }

    #[tokio::test]
    async fn test_discard_survives_failures() {
        let store = Arc::new(RecordingStore {
            fail_on: Some("b.png".to_string()),
            ..Default::default()
        });
        let notifier = Arc::new(MemoryNotifier::new());
        let pending = tracker(store.clone(), notifier.clone());
        for name in ["a.png", "b.png", "c.png"] {
            pending.track(format!("/files/{}", name), media(name)).await;
        }

        pending.discard().await;

        assert!(pending.is_empty());
        let mut deleted = store.deleted.lock().clone();
        deleted.sort();
        assert_eq!(deleted, vec!["a.png".to_string(), "c.png".to_string()]);
        let errors = notifier.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].title, "Media o‘chirishda xatolik");
    }

    #[tokio::test]
    async fn test_commit_forgets_without_deleting() {
        let store = Arc::new(RecordingStore::default());
        let pending = tracker(store.clone(), Arc::new(MemoryNotifier::new()));
        pending.track("/files/a.png", media("a.png")).await;

        pending.commit();
        pending.commit();
        pending.discard().await;

        assert!(store.deleted.lock().is_empty());
    }

    #[tokio::test]
    async fn test_release_discards_and_deletes_late_uploads() {
        let store = Arc::new(RecordingStore::default());
        let pending = tracker(store.clone(), Arc::new(MemoryNotifier::new()));
        pending.track("/files/a.png", media("a.png")).await;

        pending.release().await;
        assert_eq!(store.deleted.lock().len(), 1);

        pending.track("/files/late.png", media("late.png")).await;
        assert!(pending.is_empty());
        assert_eq!(
            *store.deleted.lock(),
            vec!["a.png".to_string(), "late.png".to_string()]
        );
    }
}
