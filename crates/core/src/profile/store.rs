//! Auto-saving profile store
//!
//! Field edits apply to the in-memory document synchronously and are then
//! queued for a merge-write. A single persistence worker drains the queue in
//! FIFO order, so the remote document sees writes in the order they were
//! issued. Photo edits also schedule an upload round that later swaps local
//! references for durable ones.
//!
//! Every background task belongs to the store's [`TaskScope`]. Upload rounds
//! additionally carry the token of the signed-in session, so signing out
//! stops them before they can apply.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::Utc;
use kindred_common::TaskScope;
use kindred_domain::constants::{UPDATED_AT_KEY, USER_ID_KEY};
use kindred_domain::{
    AutosaveConfig, FieldKind, FieldValue, KindredError, MergePolicy, Notice, PhotoRef,
    ProfileDocument, ProfileField, Result, UserIdentity,
};
use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::ports::{AssetReader, BlobStore, Document, DocumentStore, NoticeSink};
use super::session::SessionContext;
use super::upload::{run_round, RoundOutcome, UploadRound};
use crate::selection::SelectionModel;

/// Collaborators the store persists through.
#[derive(Clone)]
pub struct StoreDependencies {
    pub documents: Arc<dyn DocumentStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub assets: Arc<dyn AssetReader>,
    pub notices: Arc<dyn NoticeSink>,
}

/// What a load did to the in-memory document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored fields were merged over the in-memory document.
    Loaded,
    /// Nothing stored yet; defaults kept.
    Missing,
    /// Backend unreachable; logged, nothing surfaced.
    Offline,
    /// Any other failure; one notice surfaced.
    Failed,
    /// The account changed while loading, a different user is signed in,
    /// or nobody is.
    Skipped,
}

enum WriteCommand {
    Merge { user_id: String, fields: Document, origin: &'static str },
    Save { user_id: String, fields: Document, reply: oneshot::Sender<Result<()>> },
    Flush(oneshot::Sender<()>),
}

struct StoreState {
    document: ProfileDocument,
    user: Option<UserIdentity>,
    revision: u64,
    field_revisions: HashMap<ProfileField, u64>,
    session: CancellationToken,
}

impl StoreState {
    fn bump(&mut self, field: ProfileField) -> u64 {
        self.revision += 1;
        self.field_revisions.insert(field, self.revision);
        self.revision
    }

    fn edited_since(&self, field: ProfileField, revision: u64) -> bool {
        self.field_revisions.get(&field).is_some_and(|current| *current > revision)
    }
}

struct StoreInner {
    state: Mutex<StoreState>,
    deps: StoreDependencies,
    config: AutosaveConfig,
    writes: mpsc::UnboundedSender<WriteCommand>,
    tasks: TaskScope,
    rounds: TaskScope,
}

/// Handle to the auto-saving profile store. Clones share one store.
#[derive(Clone)]
pub struct AutoSaveStore {
    inner: Arc<StoreInner>,
}

impl AutoSaveStore {
    /// Create the store and start its persistence worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(deps: StoreDependencies, config: AutosaveConfig) -> Self {
        let tasks = TaskScope::new("autosave");
        let rounds = tasks.child("autosave.uploads");
        let (writes, queue) = mpsc::unbounded_channel();

        tasks.spawn("persistence_worker", run_persistence_worker(Arc::clone(&deps.documents), queue));

        let state = StoreState {
            document: ProfileDocument::default(),
            user: None,
            revision: 0,
            field_revisions: HashMap::new(),
            session: rounds.child_token(),
        };
        info!(
            merge_policy = ?config.merge_policy,
            upload_timeout_secs = config.upload_timeout_secs,
            "auto-save store started"
        );
        Self { inner: Arc::new(StoreInner { state: Mutex::new(state), deps, config, writes, tasks, rounds }) }
    }

    // Reads

    /// Snapshot of the in-memory document.
    pub fn document(&self) -> ProfileDocument {
        self.inner.state.lock().document.clone()
    }

    pub fn get(&self, field: ProfileField) -> FieldValue {
        self.inner.state.lock().document.get(field)
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.inner.state.lock().user.clone()
    }

    /// Upload rounds still running.
    pub fn pending_rounds(&self) -> usize {
        self.inner.rounds.active_tasks()
    }

    // Edits

    /// Replace `field` in memory, then persist it in the background.
    ///
    /// The in-memory write happens before this returns. Remote failures are
    /// logged only. Fails only when `value` has the wrong shape for `field`.
    pub fn set_field(&self, field: ProfileField, value: impl Into<FieldValue>) -> Result<()> {
        let state = self.inner.state.lock();
        self.inner.apply_edit(state, field, value.into())
    }

    /// Put `photo` into one slot of a photo field.
    pub fn set_photo(&self, field: ProfileField, slot: usize, photo: Option<PhotoRef>) -> Result<()> {
        if field.kind() != FieldKind::Photos {
            return Err(KindredError::InvalidInput(format!("'{field}' is not a photo field")));
        }
        let state = self.inner.state.lock();
        let slots = state.document.photos(field).with_slot(slot, photo)?;
        self.inner.apply_edit(state, field, FieldValue::Photos(slots))
    }

    /// Flip one tag of a tag field; returns whether it is now selected.
    pub fn toggle_tag(&self, field: ProfileField, tag: &str) -> Result<bool> {
        let state = self.inner.state.lock();
        let FieldValue::Tags(current) = state.document.get(field) else {
            return Err(KindredError::InvalidInput(format!("'{field}' is not a tag field")));
        };
        let mut selection = SelectionModel::default().with_selected(current);
        let selected = selection.toggle(tag);
        self.inner.apply_edit(state, field, FieldValue::Tags(selection.into_selected()))?;
        Ok(selected)
    }

    // Loading and saving

    /// Fetch the stored document for `user_id` and merge it over the
    /// in-memory one.
    ///
    /// Offline failures are logged only; any other failure raises exactly
    /// one notice. Neither is returned as an error.
    #[instrument(skip(self))]
    pub async fn load(&self, user_id: &str) -> LoadOutcome {
        let started = {
            let state = self.inner.state.lock();
            LoadStart { revision: state.revision, session: state.session.clone() }
        };

        match self.inner.deps.documents.get_document(user_id).await {
            Ok(Some(stored)) => self.inner.apply_loaded(user_id, &stored, &started),
            Ok(None) => {
                info!("no stored profile; keeping defaults");
                LoadOutcome::Missing
            }
            Err(err) if err.is_offline() => {
                warn!(error = %err, error_kind = err.kind(), "profile load skipped while offline");
                LoadOutcome::Offline
            }
            Err(err) => {
                error!(error = %err, error_kind = err.kind(), "profile load failed");
                self.inner.deps.notices.notify(Notice::load_failed(&err));
                LoadOutcome::Failed
            }
        }
    }

    /// Load for whoever is signed in.
    pub async fn reload(&self) -> LoadOutcome {
        match self.current_user() {
            Some(user) => self.load(&user.uid).await,
            None => {
                debug!("no signed-in user; load skipped");
                LoadOutcome::Skipped
            }
        }
    }

    /// Validate and write the whole document, waiting for the result.
    ///
    /// Unlike field edits this surfaces every failure to the caller.
    #[instrument(skip(self))]
    pub async fn save_now(&self) -> Result<()> {
        let (user, document) = {
            let state = self.inner.state.lock();
            (state.user.clone(), state.document.clone())
        };
        let Some(user) = user else {
            warn!("save requested without a signed-in user");
            return Err(KindredError::Auth("Please log in to save your profile".into()));
        };
        document.validate_for_save()?;

        let mut fields = document.to_json_map();
        fields.insert(UPDATED_AT_KEY.to_string(), timestamp());
        fields.insert(USER_ID_KEY.to_string(), Value::String(user.uid.clone()));

        let (reply, result) = oneshot::channel();
        self.inner
            .writes
            .send(WriteCommand::Save { user_id: user.uid.clone(), fields, reply })
            .map_err(|_| worker_stopped())?;
        let result = result.await.map_err(|_| worker_stopped())?;

        match &result {
            Ok(()) => info!(user_id = %user.uid, "profile saved"),
            Err(err) => warn!(user_id = %user.uid, error = %err, error_kind = err.kind(), "profile save failed"),
        }
        result
    }

    /// Wait until every write queued so far has been attempted.
    pub async fn flush(&self) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.inner.writes.send(WriteCommand::Flush(ack)).map_err(|_| worker_stopped())?;
        done.await.map_err(|_| worker_stopped())
    }

    /// Wait for running upload rounds, then flush the write queue.
    pub async fn settle(&self, timeout: Duration) -> Result<()> {
        self.inner.rounds.wait_idle(timeout).await?;
        tokio::time::timeout(timeout, self.flush())
            .await
            .map_err(|_| KindredError::Timeout(format!("flush did not finish within {timeout:?}")))?
    }

    // Session lifecycle

    /// React to a sign-in, sign-out or account switch.
    ///
    /// Any change cancels the previous session's upload rounds. Leaving an
    /// account resets the document to defaults; signing in loads.
    pub async fn on_auth_changed(&self, user: Option<UserIdentity>) -> Option<LoadOutcome> {
        {
            let mut state = self.inner.state.lock();
            let previous = state.user.as_ref().map(|u| u.uid.as_str());
            if previous == user.as_ref().map(|u| u.uid.as_str()) {
                return None;
            }

            state.session.cancel();
            state.session = self.inner.rounds.child_token();
            if state.user.is_some() {
                state.document = ProfileDocument::default();
            }
            state.user = user.clone();
        }

        match user {
            Some(user) => {
                info!(user_id = %user.uid, "user signed in; loading profile");
                Some(self.load(&user.uid).await)
            }
            None => {
                info!("user signed out; profile reset to defaults");
                None
            }
        }
    }

    /// Follow `session` until the store shuts down or the provider closes.
    ///
    /// The provider's user at the time of the call is applied right away
    /// unless the store already has it; later changes follow as published.
    pub fn attach(&self, mut session: SessionContext) -> bool {
        let initial = session.take_current();
        let replay = self.current_user().map(|u| u.uid) != initial.as_ref().map(|u| u.uid.clone());
        let store = Arc::downgrade(&self.inner);
        self.inner.tasks.spawn("auth_subscription", async move {
            let mut next = replay.then_some(initial);
            loop {
                if let Some(user) = next.take() {
                    let Some(inner) = Weak::upgrade(&store) else {
                        break;
                    };
                    AutoSaveStore { inner }.on_auth_changed(user).await;
                }
                match session.changed().await {
                    Some(user) => next = Some(user),
                    None => {
                        debug!("auth provider closed; subscription ended");
                        break;
                    }
                }
            }
        })
    }

    /// Cancel upload rounds, flush queued writes and stop every task.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<()> {
        let timeout = self.inner.config.shutdown_timeout();
        self.inner.rounds.shutdown(timeout).await?;

        match tokio::time::timeout(timeout, self.flush()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => debug!(error = %err, "write queue already closed"),
            Err(_) => warn!(timeout_ms = timeout.as_millis() as u64, "pending writes not flushed before shutdown"),
        }

        self.inner.tasks.shutdown(timeout).await?;
        info!("auto-save store shut down");
        Ok(())
    }
}

/// State captured when a load was issued.
struct LoadStart {
    revision: u64,
    session: CancellationToken,
}

impl StoreInner {
    /// Write `value` into the locked document, queue its merge-write and,
    /// for photo fields with local references, schedule an upload round.
    ///
    /// The merge is queued before the lock is released so remote order
    /// matches in-memory order.
    fn apply_edit(
        self: &Arc<Self>,
        mut state: MutexGuard<'_, StoreState>,
        field: ProfileField,
        value: FieldValue,
    ) -> Result<()> {
        state.document.set(field, value.clone())?;
        let revision = state.bump(field);
        let Some(user) = state.user.clone() else {
            debug!(field = %field, "no signed-in user; edit kept in memory only");
            return Ok(());
        };
        self.enqueue_merge(&user.uid, field, &value, "set_field");
        let session = state.session.clone();
        drop(state);

        if let FieldValue::Photos(snapshot) = value {
            if snapshot.has_local() {
                let round = UploadRound { user_id: user.uid, field, snapshot, revision };
                self.schedule_round(round, session);
            }
        }
        Ok(())
    }

    fn schedule_round(self: &Arc<Self>, round: UploadRound, session: CancellationToken) {
        let assets = Arc::clone(&self.deps.assets);
        let blobs = Arc::clone(&self.deps.blobs);
        let timeout = self.config.upload_timeout();
        let store = Arc::downgrade(self);
        let token = session.clone();
        let field = round.field;
        let local_slots = round.snapshot.local_slots().len();

        let spawned = self.rounds.spawn_with_token("upload_round", token, async move {
            let outcome = run_round(&round, assets.as_ref(), blobs.as_ref(), timeout).await;
            if let Some(inner) = Weak::upgrade(&store) {
                inner.apply_round(round, outcome, &session);
            }
        });
        if spawned {
            debug!(field = %field, local_slots, "upload round scheduled");
        }
    }

    fn enqueue_merge(&self, user_id: &str, field: ProfileField, value: &FieldValue, origin: &'static str) {
        let mut fields = Document::new();
        fields.insert(field.as_key().to_string(), value.to_json());
        fields.insert(UPDATED_AT_KEY.to_string(), timestamp());

        let command = WriteCommand::Merge { user_id: user_id.to_string(), fields, origin };
        if self.writes.send(command).is_err() {
            debug!(field = %field, origin, "persistence worker stopped; write dropped");
        }
    }

    fn apply_loaded(&self, user_id: &str, stored: &Document, started: &LoadStart) -> LoadOutcome {
        let mut state = self.state.lock();
        if started.session.is_cancelled() {
            debug!(user_id, "account changed during load; result dropped");
            return LoadOutcome::Skipped;
        }
        if state.user.as_ref().is_some_and(|user| user.uid != user_id) {
            debug!(user_id, "a different user is signed in; result dropped");
            return LoadOutcome::Skipped;
        }
        let started_at = started.revision;

        let stored: Document = match self.config.merge_policy {
            MergePolicy::LastApplied => stored.clone(),
            MergePolicy::NewestEdit => stored
                .iter()
                .filter(|(key, _)| match key.parse::<ProfileField>() {
                    Ok(field) => !state.edited_since(field, started_at),
                    Err(_) => true,
                })
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        };

        let rejected = state.document.merge_stored(&stored);
        if !rejected.is_empty() {
            warn!(user_id, fields = ?rejected, "stored fields with unexpected shape ignored");
        }
        info!(user_id, fields = stored.len(), "profile loaded");
        LoadOutcome::Loaded
    }

    fn apply_round(&self, round: UploadRound, outcome: RoundOutcome, session: &CancellationToken) {
        let field = round.field;
        if !outcome.should_apply() {
            warn!(field = %field, "upload round timed out without progress; nothing applied");
            return;
        }

        let mut state = self.state.lock();
        if session.is_cancelled() {
            debug!(field = %field, "session ended; upload round dropped");
            return;
        }
        if self.config.merge_policy == MergePolicy::NewestEdit && state.edited_since(field, round.revision) {
            debug!(field = %field, revision = round.revision, "field edited since round started; result dropped");
            return;
        }

        let value = FieldValue::Photos(outcome.slots);
        if let Err(err) = state.document.set(field, value.clone()) {
            error!(field = %field, error = %err, "upload round targeted a non-photo field");
            return;
        }
        state.bump(field);
        self.enqueue_merge(&round.user_id, field, &value, "upload_round");
        drop(state);

        info!(
            field = %field,
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            timed_out = outcome.timed_out,
            "upload round applied"
        );
    }
}

async fn run_persistence_worker(
    documents: Arc<dyn DocumentStore>,
    mut queue: mpsc::UnboundedReceiver<WriteCommand>,
) {
    while let Some(command) = queue.recv().await {
        match command {
            WriteCommand::Merge { user_id, fields, origin } => {
                let keys: Vec<String> = fields.keys().cloned().collect();
                match documents.merge_write(&user_id, fields).await {
                    Ok(()) => debug!(user_id = %user_id, origin, fields = ?keys, "merge-write stored"),
                    Err(err) => warn!(
                        user_id = %user_id,
                        origin,
                        fields = ?keys,
                        error = %err,
                        error_kind = err.kind(),
                        "background merge-write failed"
                    ),
                }
            }
            WriteCommand::Save { user_id, fields, reply } => {
                let result = documents.merge_write(&user_id, fields).await;
                if reply.send(result).is_err() {
                    debug!(user_id = %user_id, "save caller went away before the result");
                }
            }
            WriteCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("persistence worker stopped");
}

fn timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339())
}

fn worker_stopped() -> KindredError {
    KindredError::Internal("persistence worker is not running".into())
}
