//! Operator notifications
//!
//! Upload, delete, validation and mutation outcomes are reported as transient
//! notices. The engine only talks to the [`Notifier`] trait; a UI shows them as
//! toasts, the CLI logs them.

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One transient notice: a title and an optional description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Emits notices as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.level {
            NoticeLevel::Success => tracing::info!(title = %notice.title, "{}", description),
            NoticeLevel::Error => tracing::warn!(title = %notice.title, "{}", description),
        }
    }
}

/// Keeps every notice in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn errors(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.notices.lock().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}
