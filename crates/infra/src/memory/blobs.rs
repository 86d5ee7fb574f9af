use std::collections::HashMap;

use async_trait::async_trait;
use kindred_core::BlobStore;
use kindred_domain::Result;
use parking_lot::Mutex;

const DEFAULT_PUBLIC_BASE: &str = "https://storage.kindred.local";

/// Blob store that keeps bytes in memory and hands out `https` references,
/// so stored photos read back as durable.
#[derive(Debug)]
pub struct InMemoryBlobStore {
    public_base: String,
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::with_public_base(DEFAULT_PUBLIC_BASE)
    }

    pub fn with_public_base(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { public_base: base, blobs: Mutex::new(HashMap::new()) }
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String> {
        self.blobs.lock().insert(key.to_string(), bytes);
        Ok(format!("{}/{key}", self.public_base))
    }
}

#[cfg(test)]
mod tests {
    use kindred_domain::PhotoRef;

    use super::*;

    #[tokio::test]
    async fn upload_returns_durable_reference() {
        let store = InMemoryBlobStore::with_public_base("https://cdn.test/");
        let reference = store.upload("u1/socialPhotos/0_1", vec![1, 2, 3]).await.unwrap();

        assert_eq!(reference, "https://cdn.test/u1/socialPhotos/0_1");
        assert!(!PhotoRef::parse(&reference).is_local());
        assert_eq!(store.get("u1/socialPhotos/0_1"), Some(vec![1, 2, 3]));
        assert_eq!(store.len(), 1);
    }
}
