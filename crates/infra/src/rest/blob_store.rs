//! Photo bytes over a REST blob API.
//!
//! `PUT {base}/{key}` stores the bytes. The response may name the public URL
//! as `{"url": ...}`; otherwise the object URL itself is the durable
//! reference.

use async_trait::async_trait;
use kindred_core::BlobStore;
use kindred_domain::{BackendConfig, KindredError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::http::{endpoint, parse_base_url, HttpClient};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

pub struct RestBlobStore {
    http: HttpClient,
    base_url: Url,
}

impl RestBlobStore {
    pub fn new(http: HttpClient, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn from_config(http: HttpClient, config: &BackendConfig) -> Result<Self> {
        let raw = config
            .blob_base_url
            .as_deref()
            .ok_or_else(|| KindredError::Config("backend.blob_base_url is not set".into()))?;
        Ok(Self::new(http, parse_base_url(raw)?))
    }

    /// Object URL for `key`; each `/`-separated part becomes one segment.
    pub fn object_url(&self, key: &str) -> Result<Url> {
        endpoint(&self.base_url, key.split('/').filter(|part| !part.is_empty()))
    }
}

#[async_trait]
impl BlobStore for RestBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String> {
        let url = self.object_url(key)?;
        let request = self
            .http
            .request(Method::PUT, url.clone())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes);
        let response = self.http.send_checked(request, "upload photo").await?;

        let body = response.bytes().await.unwrap_or_default();
        let durable = serde_json::from_slice::<UploadResponse>(&body)
            .map(|parsed| parsed.url)
            .unwrap_or_else(|_| url.to_string());
        debug!(durable = %durable, "photo stored");
        Ok(durable)
    }
}
