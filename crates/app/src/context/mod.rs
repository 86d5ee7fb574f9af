//! Application context - dependency injection container

use std::sync::Arc;

use kindred_core::{
    AuthProvider, AutoSaveStore, BlobStore, DocumentStore, InteractionLog, LoadOutcome,
    ProfileSource, SessionContext, StoreDependencies, SwipeDeckController,
};
use kindred_domain::{Category, Config, Result, UserIdentity};
use kindred_infra::{
    ChannelAuthProvider, FileAssetReader, HttpClient, InMemoryBlobStore, InMemoryDocumentStore,
    RestBlobStore, RestDocumentStore, StaticProfileSource, TracingInteractionLog,
    TracingNoticeSink,
};
use tracing::info;

/// Where profile documents and photos are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    InMemory,
    Remote,
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub storage: StorageMode,
    pub profiles: Arc<dyn ProfileSource>,
    pub interactions: Arc<dyn InteractionLog>,
    pub auth: Arc<ChannelAuthProvider>,
    pub store: AutoSaveStore,
}

impl AppContext {
    /// Create the context from the loaded configuration.
    pub async fn new() -> Result<Self> {
        let config = kindred_infra::config::load()?;
        Self::new_with_config(config).await
    }

    /// Create the context from an explicit configuration.
    ///
    /// Remote adapters are used for whichever backend URLs are configured;
    /// the rest fall back to in-memory stores. Must run inside a Tokio
    /// runtime.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        let backend = &config.backend;
        let needs_http = backend.document_base_url.is_some() || backend.blob_base_url.is_some();
        let http = if needs_http { Some(HttpClient::from_backend(backend)?) } else { None };

        let documents: Arc<dyn DocumentStore> = match &http {
            Some(http) if backend.document_base_url.is_some() => {
                Arc::new(RestDocumentStore::from_config(http.clone(), backend)?)
            }
            _ => Arc::new(InMemoryDocumentStore::new()),
        };
        let blobs: Arc<dyn BlobStore> = match &http {
            Some(http) if backend.blob_base_url.is_some() => {
                Arc::new(RestBlobStore::from_config(http.clone(), backend)?)
            }
            _ => Arc::new(InMemoryBlobStore::new()),
        };
        let storage = if backend.document_base_url.is_some() {
            StorageMode::Remote
        } else {
            StorageMode::InMemory
        };

        let store = AutoSaveStore::new(
            StoreDependencies {
                documents,
                blobs,
                assets: Arc::new(FileAssetReader::new()),
                notices: Arc::new(TracingNoticeSink),
            },
            config.autosave.clone(),
        );

        let auth = Arc::new(ChannelAuthProvider::new());
        store.attach(SessionContext::from_provider(auth.as_ref()));

        info!(
            storage = ?storage,
            merge_policy = ?config.autosave.merge_policy,
            "application context initialised"
        );

        Ok(Self {
            config,
            storage,
            profiles: Arc::new(StaticProfileSource::sample()),
            interactions: Arc::new(TracingInteractionLog),
            auth,
            store,
        })
    }

    /// Sign `user` in and load their profile.
    ///
    /// The provider publishes first so the auth subscription can only ever
    /// observe the newest user. Whichever of the two reaches the store first
    /// performs the load; the other is a no-op, in which case this returns
    /// `None`.
    pub async fn sign_in(&self, user: UserIdentity) -> Option<LoadOutcome> {
        self.auth.sign_in(user.clone());
        self.store.on_auth_changed(Some(user)).await
    }

    pub async fn sign_out(&self) {
        self.auth.sign_out();
        self.store.on_auth_changed(None).await;
    }

    /// Fresh deck over the profile source, excluding the owner's record.
    pub async fn swipe_deck(&self, mode: Option<Category>) -> Result<SwipeDeckController> {
        SwipeDeckController::from_source(
            self.profiles.as_ref(),
            mode,
            self.config.swipe.clone(),
            Arc::clone(&self.interactions),
        )
        .await
    }

    /// Subscribe to auth changes, e.g. for a UI layer.
    pub fn session(&self) -> SessionContext {
        SessionContext::new(self.auth.subscribe())
    }

    /// Flush pending profile writes and stop background tasks.
    pub async fn shutdown(&self) -> Result<()> {
        info!("shutdown called on AppContext");
        self.store.shutdown().await
    }
}
