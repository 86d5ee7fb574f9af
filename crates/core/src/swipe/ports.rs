//! Port interfaces for the swipe deck
//!
//! These traits define the boundaries between the deck controller
//! and whatever supplies candidates or records decisions.

use async_trait::async_trait;
use kindred_domain::{CandidateProfile, Decision, Result};

/// Supplies the full candidate list for a browsing session.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// All candidates, in display order. No pagination.
    async fn list_candidates(&self) -> Result<Vec<CandidateProfile>>;
}

/// Receives committed decisions. Fire-and-forget.
pub trait InteractionLog: Send + Sync {
    fn record_decision(&self, decision: &Decision);
}
