use std::collections::HashMap;

use async_trait::async_trait;
use kindred_core::{Document, DocumentStore};
use kindred_domain::Result;
use parking_lot::Mutex;
use serde_json::Value;

/// Document store held in a map keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<HashMap<String, Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored document. Non-object values seed an empty document.
    pub fn with_document(self, user_id: impl Into<String>, document: Value) -> Self {
        let map = match document {
            Value::Object(map) => map,
            _ => Document::new(),
        };
        self.documents.lock().insert(user_id.into(), map);
        self
    }

    /// Copy of the stored document for `user_id`.
    pub fn snapshot(&self, user_id: &str) -> Option<Document> {
        self.documents.lock().get(user_id).cloned()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_document(&self, user_id: &str) -> Result<Option<Document>> {
        Ok(self.snapshot(user_id))
    }

    async fn merge_write(&self, user_id: &str, fields: Document) -> Result<()> {
        let mut documents = self.documents.lock();
        let document = documents.entry(user_id.to_string()).or_default();
        document.extend(fields);
        Ok(())
    }
}
