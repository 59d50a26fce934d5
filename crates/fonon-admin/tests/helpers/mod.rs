//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use fonon_admin::{get_resource_config, ResourcePage, ResourceKey};
use fonon_core::{
    AppError, AppResult, DeleteTarget, MediaFile, MediaStore, MemoryNotifier, Notifier, Record, ResourceService,
    UploadedMedia,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

pub const CDN: &str = "https://cdn.fonon.test";

/// File store that keeps every call. Uploads of files named `broken*` fail;
/// deletes fail for targets listed with [`MemoryMediaStore::fail_delete_of`]
/// or for every target once [`MemoryMediaStore::fail_all_deletes`] is set.
#[derive(Default)]
pub struct MemoryMediaStore {
    counter: AtomicUsize,
    uploads: Mutex<Vec<(String, String)>>,
    deletes: Mutex<Vec<String>>,
    failing_deletes: Mutex<HashSet<String>>,
    fail_all: AtomicBool,
}

impl MemoryMediaStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// `(category, file name)` of every upload attempt.
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().clone()
    }

    /// Delete target values, in call order, including failed attempts.
    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().clone()
    }

    pub fn fail_delete_of(&self, target: &str) {
        self.failing_deletes.lock().insert(target.to_string());
    }

    pub fn fail_all_deletes(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn upload(&self, category: &str, file: MediaFile) -> AppResult<UploadedMedia> {
        self.uploads
            .lock()
            .push((category.to_string(), file.name.clone()));
        if file.name.starts_with("broken") {
            return Err(AppError::UploadFailed(format!("{} could not be stored", file.name)));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let path = format!("{}/{}-{}", category, n, file.name);
        Ok(UploadedMedia {
            url: format!("{}/files/{}", CDN, path),
            path: Some(path),
            raw_url: None,
        })
    }

    async fn delete(&self, target: &DeleteTarget) -> AppResult<()> {
        let Some(value) = target.value() else {
            return Ok(());
        };
        self.deletes.lock().push(value.to_string());
        if self.fail_all.load(Ordering::SeqCst) || self.failing_deletes.lock().contains(value) {
            return Err(AppError::DeleteFailed(format!("{} is locked", value)));
        }
        Ok(())
    }

    fn resolve_url(&self, url: &str) -> String {
        fonon_core::resolve_media_url(Some(CDN), Some(url), None).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    List,
    Create(Record),
    Update(i64, Record),
    Remove(i64),
}

/// CRUD service over a vector of records.
#[derive(Default)]
pub struct MemoryResourceService {
    records: Mutex<Vec<Record>>,
    calls: Mutex<Vec<ServiceCall>>,
    next_id: AtomicI64,
    fail_mutations: AtomicBool,
}

impl MemoryResourceService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        })
    }

    pub fn with_records(records: Vec<Value>) -> Arc<Self> {
        let service = Self::new();
        let mut max_id = 0;
        for value in records {
            if let Value::Object(record) = value {
                max_id = max_id.max(record.get("id").and_then(Value::as_i64).unwrap_or(0));
                service.records.lock().push(record);
            }
        }
        service.next_id.store(max_id + 1, Ordering::SeqCst);
        service
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, ServiceCall::List))
            .count()
    }

    pub fn last_payload(&self) -> Option<Record> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            ServiceCall::Create(payload) | ServiceCall::Update(_, payload) => Some(payload.clone()),
            _ => None,
        })
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    fn check_mutation(&self) -> AppResult<()> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(AppError::Api {
                status: 500,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceService for MemoryResourceService {
    async fn list(&self) -> AppResult<Vec<Record>> {
        self.calls.lock().push(ServiceCall::List);
        Ok(self.records.lock().clone())
    }

    async fn get(&self, id: i64) -> AppResult<Record> {
        self.records
            .lock()
            .iter()
            .find(|r| r.get("id").and_then(Value::as_i64) == Some(id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("record {}", id)))
    }

    async fn create(&self, payload: Record) -> AppResult<Record> {
        self.calls.lock().push(ServiceCall::Create(payload.clone()));
        self.check_mutation()?;
        let mut record = payload;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.insert("id".to_string(), json!(id));
        self.records.lock().push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, payload: Record) -> AppResult<Record> {
        self.calls.lock().push(ServiceCall::Update(id, payload.clone()));
        self.check_mutation()?;
        let mut records = self.records.lock();
        let existing = records
            .iter_mut()
            .find(|r| r.get("id").and_then(Value::as_i64) == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("record {}", id)))?;
        existing.extend(payload);
        Ok(existing.clone())
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        self.calls.lock().push(ServiceCall::Remove(id));
        self.check_mutation()?;
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|r| r.get("id").and_then(Value::as_i64) != Some(id));
        if records.len() == before {
            return Err(AppError::NotFound(format!("record {}", id)));
        }
        Ok(())
    }
}

pub struct TestPage {
    pub page: ResourcePage,
    pub store: Arc<MemoryMediaStore>,
    pub service: Arc<MemoryResourceService>,
    pub notifier: Arc<MemoryNotifier>,
}

pub fn setup_page(key: ResourceKey, records: Vec<Value>) -> TestPage {
    let store = MemoryMediaStore::new();
    let service = MemoryResourceService::with_records(records);
    let notifier = Arc::new(MemoryNotifier::new());
    let page = ResourcePage::new(
        get_resource_config(key),
        service.clone() as Arc<dyn ResourceService>,
        store.clone() as Arc<dyn MediaStore>,
        notifier.clone() as Arc<dyn Notifier>,
    );
    TestPage {
        page,
        store,
        service,
        notifier,
    }
}

pub fn image(name: &str) -> MediaFile {
    MediaFile::new(name, "image/png", vec![0u8; 8])
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().expect("record literal must be an object")
}

/// Titles of every notice received so far.
pub fn notice_titles(notifier: &MemoryNotifier) -> Vec<String> {
    notifier.notices().into_iter().map(|n| n.title).collect()
}
