//! Shared test helpers for `kindred-core` integration tests.
//!
//! In-memory mocks for every profile port so the auto-save tests can focus
//! on ordering and failure handling instead of transport.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kindred_core::{AssetReader, BlobStore, Document, DocumentStore, NoticeSink, StoreDependencies};
use kindred_domain::{KindredError, Notice, Result as DomainResult};
use parking_lot::Mutex;
use serde_json::Value;

/// Document store that keeps merged documents and every write in order.
#[derive(Default)]
pub struct MockDocumentStore {
    documents: Mutex<HashMap<String, Document>>,
    writes: Mutex<Vec<(String, Document)>>,
    gets: Mutex<Vec<String>>,
    get_error: Mutex<Option<KindredError>>,
    write_error: Mutex<Option<KindredError>>,
    get_delay: Mutex<Option<Duration>>,
}

impl MockDocumentStore {
    pub fn with_document(self, user_id: &str, document: Value) -> Self {
        let map = document.as_object().cloned().unwrap_or_default();
        self.documents.lock().insert(user_id.to_string(), map);
        self
    }

    pub fn fail_gets_with(&self, err: KindredError) {
        *self.get_error.lock() = Some(err);
    }

    pub fn fail_writes_with(&self, err: KindredError) {
        *self.write_error.lock() = Some(err);
    }

    pub fn delay_gets(&self, delay: Duration) {
        *self.get_delay.lock() = Some(delay);
    }

    /// Current merged value of one field.
    pub fn stored_field(&self, user_id: &str, key: &str) -> Option<Value> {
        self.documents.lock().get(user_id).and_then(|doc| doc.get(key).cloned())
    }

    /// Users whose document was fetched, in call order.
    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().clone()
    }

    pub fn writes(&self) -> Vec<(String, Document)> {
        self.writes.lock().clone()
    }

    /// Writes that touched `key`, oldest first.
    pub fn writes_for(&self, key: &str) -> Vec<Value> {
        self.writes.lock().iter().filter_map(|(_, fields)| fields.get(key).cloned()).collect()
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn get_document(&self, user_id: &str) -> DomainResult<Option<Document>> {
        self.gets.lock().push(user_id.to_string());
        let delay = *self.get_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.get_error.lock().clone() {
            return Err(err);
        }
        Ok(self.documents.lock().get(user_id).cloned())
    }

    async fn merge_write(&self, user_id: &str, fields: Document) -> DomainResult<()> {
        if let Some(err) = self.write_error.lock().clone() {
            return Err(err);
        }
        self.writes.lock().push((user_id.to_string(), fields.clone()));
        let mut documents = self.documents.lock();
        let document = documents.entry(user_id.to_string()).or_default();
        for (key, value) in fields {
            document.insert(key, value);
        }
        Ok(())
    }
}

/// Blob store returning `https://blobs.test/{key}`; keys of slots listed in
/// `failing_slots` fail, uploads sleep for `delay` first.
#[derive(Default)]
pub struct MockBlobStore {
    uploads: Mutex<Vec<String>>,
    failing_slots: Mutex<Vec<usize>>,
    delay: Mutex<Option<Duration>>,
}

impl MockBlobStore {
    pub fn fail_slot(&self, slot: usize) {
        self.failing_slots.lock().push(slot);
    }

    pub fn delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.uploads.lock().clone()
    }
}

fn slot_of(key: &str) -> Option<usize> {
    key.rsplit('/').next()?.split('_').next()?.parse().ok()
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn upload(&self, key: &str, _bytes: Vec<u8>) -> DomainResult<String> {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let failing = slot_of(key).is_some_and(|slot| self.failing_slots.lock().contains(&slot));
        if failing {
            return Err(KindredError::Network(format!("upload rejected: {key}")));
        }
        self.uploads.lock().push(key.to_string());
        Ok(format!("https://blobs.test/{key}"))
    }
}

/// Asset reader returning the reference's own bytes.
#[derive(Default)]
pub struct MockAssetReader;

#[async_trait]
impl AssetReader for MockAssetReader {
    async fn read(&self, local_ref: &str) -> DomainResult<Vec<u8>> {
        Ok(local_ref.as_bytes().to_vec())
    }
}

#[derive(Default)]
pub struct RecordingNotices(Mutex<Vec<Notice>>);

impl RecordingNotices {
    pub fn notices(&self) -> Vec<Notice> {
        self.0.lock().clone()
    }
}

impl NoticeSink for RecordingNotices {
    fn notify(&self, notice: Notice) {
        self.0.lock().push(notice);
    }
}

/// Mocks wired together, with handles kept for assertions.
pub struct Harness {
    pub documents: Arc<MockDocumentStore>,
    pub blobs: Arc<MockBlobStore>,
    pub notices: Arc<RecordingNotices>,
}

impl Harness {
    pub fn new(documents: MockDocumentStore) -> Self {
        Self {
            documents: Arc::new(documents),
            blobs: Arc::new(MockBlobStore::default()),
            notices: Arc::new(RecordingNotices::default()),
        }
    }

    pub fn dependencies(&self) -> StoreDependencies {
        StoreDependencies {
            documents: self.documents.clone(),
            blobs: self.blobs.clone(),
            assets: Arc::new(MockAssetReader),
            notices: self.notices.clone(),
        }
    }
}
