//! Profile documents over a REST document API.
//!
//! `GET {base}/{collection}/{uid}` returns the stored JSON object (404 when
//! the user has none). `PATCH` with a partial object performs the shallow
//! field-level merge.

use async_trait::async_trait;
use kindred_core::{Document, DocumentStore};
use kindred_domain::{BackendConfig, KindredError, Result};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::errors::status_error;
use crate::http::{endpoint, parse_base_url, HttpClient};

pub struct RestDocumentStore {
    http: HttpClient,
    base_url: Url,
    collection: String,
}

impl RestDocumentStore {
    pub fn new(http: HttpClient, base_url: Url, collection: impl Into<String>) -> Self {
        Self { http, base_url, collection: collection.into() }
    }

    /// Store for the configured document endpoint.
    ///
    /// # Errors
    /// `KindredError::Config` if no document URL is configured or it does not
    /// parse.
    pub fn from_config(http: HttpClient, config: &BackendConfig) -> Result<Self> {
        let raw = config
            .document_base_url
            .as_deref()
            .ok_or_else(|| KindredError::Config("backend.document_base_url is not set".into()))?;
        Ok(Self::new(http, parse_base_url(raw)?, config.collection.clone()))
    }

    fn document_url(&self, user_id: &str) -> Result<Url> {
        endpoint(&self.base_url, [self.collection.as_str(), user_id])
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    #[instrument(skip(self))]
    async fn get_document(&self, user_id: &str) -> Result<Option<Document>> {
        let url = self.document_url(user_id)?;
        let response = self.http.send(self.http.request(Method::GET, url)).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("no stored profile document");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error(status, "fetch profile document"));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| KindredError::Unavailable(format!("profile document body: {err}")))?;
        match serde_json::from_slice::<Value>(&body)? {
            Value::Object(document) => Ok(Some(document)),
            Value::Null => Ok(None),
            other => Err(KindredError::Storage(format!(
                "profile document is not an object (got {})",
                json_type(&other)
            ))),
        }
    }

    #[instrument(skip(self, fields), fields(keys = fields.len()))]
    async fn merge_write(&self, user_id: &str, fields: Document) -> Result<()> {
        let url = self.document_url(user_id)?;
        let request = self.http.request(Method::PATCH, url).json(&fields);
        self.http.send_checked(request, "merge profile document").await?;
        debug!("profile document merged");
        Ok(())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
