//! Port interfaces for profile persistence
//!
//! These traits define the boundaries between the auto-save store and the
//! document store, blob store, device assets, auth provider and the UI's
//! notice surface.

use async_trait::async_trait;
use kindred_domain::{Notice, Result, UserIdentity};
use serde_json::{Map, Value};
use tokio::sync::watch;

/// Arbitrary key/value document stored per user.
pub type Document = Map<String, Value>;

/// Remote per-user document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the stored document, `None` when the user has none yet.
    async fn get_document(&self, user_id: &str) -> Result<Option<Document>>;

    /// Shallow field-level upsert. Fields absent from `fields` are kept.
    async fn merge_write(&self, user_id: &str, fields: Document) -> Result<()>;
}

/// Remote blob store for photo bytes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key` and return a durable, fetchable reference.
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String>;
}

/// Resolves device-local photo references to their bytes.
#[async_trait]
pub trait AssetReader: Send + Sync {
    async fn read(&self, local_ref: &str) -> Result<Vec<u8>>;
}

/// Source of authentication state changes.
pub trait AuthProvider: Send + Sync {
    /// Receiver that always holds the current user and wakes on changes.
    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>>;
}

/// Non-fatal, user-visible notices.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}
