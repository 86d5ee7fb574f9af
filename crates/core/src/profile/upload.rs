//! Background photo upload rounds
//!
//! A round works on a snapshot of one photo field. Every slot holding a
//! local reference is read and uploaded concurrently; successes replace the
//! slot in a shared working copy, failures leave the local reference in
//! place. The whole round is bounded by a timeout, after which unfinished
//! uploads are dropped and their slots stay local.

use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use kindred_domain::{KindredError, PhotoRef, PhotoSlots, ProfileField};
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::ports::{AssetReader, BlobStore};

/// Blob key for one slot: `{user_id}/{field}/{slot}_{timestamp_millis}`.
pub fn blob_key(user_id: &str, field: ProfileField, slot: usize, timestamp_millis: i64) -> String {
    format!("{user_id}/{}/{slot}_{timestamp_millis}", field.as_key())
}

/// Result of one upload round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Working copy after the round: durable references where uploads
    /// succeeded, the original references everywhere else.
    pub slots: PhotoSlots,
    pub succeeded: usize,
    pub failed: usize,
    pub timed_out: bool,
}

impl RoundOutcome {
    /// A round is applied if any slot succeeded or it finished in time.
    pub fn should_apply(&self) -> bool {
        self.succeeded > 0 || !self.timed_out
    }
}

/// Inputs captured when the round was scheduled.
#[derive(Debug, Clone)]
pub(crate) struct UploadRound {
    pub user_id: String,
    pub field: ProfileField,
    pub snapshot: PhotoSlots,
    /// Field revision the snapshot was taken at.
    pub revision: u64,
}

async fn upload_slot(
    round: &UploadRound,
    slot: usize,
    local_ref: &str,
    assets: &dyn AssetReader,
    blobs: &dyn BlobStore,
) -> Result<String, KindredError> {
    let bytes = assets.read(local_ref).await?;
    let key = blob_key(&round.user_id, round.field, slot, Utc::now().timestamp_millis());
    debug!(field = %round.field, slot, key = %key, bytes = bytes.len(), "uploading photo");
    blobs.upload(&key, bytes).await
}

pub(crate) async fn run_round(
    round: &UploadRound,
    assets: &dyn AssetReader,
    blobs: &dyn BlobStore,
    timeout: Duration,
) -> RoundOutcome {
    let working = Mutex::new(round.snapshot.clone());
    let tally = Mutex::new((0usize, 0usize));

    let uploads = round.snapshot.local_slots().into_iter().map(|(slot, local_ref)| {
        let working = &working;
        let tally = &tally;
        async move {
            match upload_slot(round, slot, &local_ref, assets, blobs).await {
                Ok(remote) => {
                    // Slot index comes from the snapshot, so it is in range.
                    let _ = working.lock().set(slot, Some(PhotoRef::Remote(remote)));
                    tally.lock().0 += 1;
                }
                Err(err) => {
                    warn!(
                        field = %round.field,
                        slot,
                        error = %err,
                        error_kind = err.kind(),
                        "photo upload failed; keeping local reference"
                    );
                    tally.lock().1 += 1;
                }
            }
        }
    });

    let timed_out = tokio::time::timeout(timeout, join_all(uploads)).await.is_err();
    if timed_out {
        warn!(
            field = %round.field,
            timeout_secs = timeout.as_secs(),
            "upload round timed out; unfinished slots keep local references"
        );
    }

    let (succeeded, failed) = *tally.lock();
    let slots = working.into_inner();
    RoundOutcome { slots, succeeded, failed, timed_out }
}
