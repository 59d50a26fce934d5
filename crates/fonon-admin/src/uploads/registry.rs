//! Form-scoped registry of upload handles
//!
//! Every media-bearing field registers a handle while it is mounted. When the
//! form is cancelled the page calls [`UploadRegistry::discard_all`] so that
//! files uploaded during the session are deleted again; on a successful save it
//! calls [`UploadRegistry::commit_all`] so they are kept.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use futures::future::join_all;
use indexmap::IndexMap;
use parking_lot::Mutex;

/// Capability of a field that owns pending uploads.
#[async_trait]
pub trait UploadHandle: Send + Sync {
    /// Delete every pending upload and forget them. Never fails; delete
    /// failures are reported by the handle itself.
    async fn discard_uploads(&self);

    /// Forget every pending upload without deleting anything.
    fn commit_uploads(&self);
}

#[derive(Default)]
struct RegistryInner {
    handles: Mutex<IndexMap<u64, Arc<dyn UploadHandle>>>,
    next_id: AtomicU64,
}

/// Registry of the upload handles mounted in one form.
///
/// Cheap to clone; clones share the same set of handles.
#[derive(Clone, Default)]
pub struct UploadRegistry {
    inner: Arc<RegistryInner>,
}

impl UploadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle. It stays registered until the returned guard is
    /// dropped or [`Registration::unregister`] is called.
    pub fn register(&self, handle: Arc<dyn UploadHandle>) -> Registration {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.handles.lock().insert(id, handle);
        tracing::trace!(handle_id = id, "Upload handle registered");

        Registration {
            registry: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Discard the uploads of every registered handle concurrently.
    ///
    /// Resolves once all handles have finished, whatever their outcome.
    pub async fn discard_all(&self) {
        let handles = self.snapshot();
        if handles.is_empty() {
            return;
        }

        tracing::debug!(handles = handles.len(), "Discarding pending uploads");
        join_all(handles.iter().map(|handle| handle.discard_uploads())).await;
    }

    /// Commit the uploads of every registered handle.
    pub fn commit_all(&self) {
        let handles = self.snapshot();
        tracing::debug!(handles = handles.len(), "Committing pending uploads");
        for handle in handles {
            handle.commit_uploads();
        }
    }

    /// Drop every registration without touching the handles' uploads.
    pub fn clear_all(&self) {
        self.inner.handles.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.handles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Handles are called outside the lock so they may (un)register freely.
    fn snapshot(&self) -> Vec<Arc<dyn UploadHandle>> {
        self.inner.handles.lock().values().cloned().collect()
    }
}

impl std::fmt::Debug for UploadRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRegistry")
            .field("handles", &self.len())
            .finish()
    }
}

/// Guard returned by [`UploadRegistry::register`]; unregisters on drop.
#[derive(Debug)]
pub struct Registration {
    registry: Weak<RegistryInner>,
    id: u64,
}

impl Registration {
    pub fn unregister(self) {
        drop(self);
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            inner.handles.lock().shift_remove(&self.id);
            tracing::trace!(handle_id = self.id, "Upload handle unregistered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingHandle {
        discarded: AtomicUsize,
        committed: AtomicUsize,
    }

    #[async_trait]
    impl UploadHandle for CountingHandle {
        async fn discard_uploads(&self) {
            self.discarded.fetch_add(1, Ordering::SeqCst);
        }

        fn commit_uploads(&self) {
            self.committed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = UploadRegistry::new();
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_discard_all_reaches_every_handle() {
        let registry = UploadRegistry::new();
        let first = Arc::new(CountingHandle::default());
        let second = Arc::new(CountingHandle::default());
        let _a = registry.register(first.clone());
        let _b = registry.register(second.clone());

        registry.discard_all().await;

        assert_eq!(first.discarded.load(Ordering::SeqCst), 1);
        assert_eq!(second.discarded.load(Ordering::SeqCst), 1);
        assert_eq!(first.committed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dropped_registration_is_skipped() {
        let registry = UploadRegistry::new();
        let handle = Arc::new(CountingHandle::default());
        let registration = registry.register(handle.clone());
        assert_eq!(registry.len(), 1);

        registration.unregister();
        assert!(registry.is_empty());

        registry.discard_all().await;
        registry.commit_all();
        assert_eq!(handle.discarded.load(Ordering::SeqCst), 0);
        assert_eq!(handle.committed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_commit_all_and_clear_all() {
        let registry = UploadRegistry::new();
        let handle = Arc::new(CountingHandle::default());
        let registration = registry.register(handle.clone());

        registry.commit_all();
        assert_eq!(handle.committed.load(Ordering::SeqCst), 1);

        registry.clear_all();
        assert!(registry.is_empty());
        // Dropping after clear_all is harmless.
        drop(registration);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registration_outlives_registry() {
        let registry = UploadRegistry::new();
        let registration = registry.register(Arc::new(CountingHandle::default()));
        drop(registry);
        drop(registration);
    }
}
