//! Log-backed implementations of the fire-and-forget ports.

use kindred_core::{InteractionLog, NoticeSink};
use kindred_domain::{Decision, Notice};
use tracing::{info, warn};

/// Records swipe decisions as structured log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInteractionLog;

impl InteractionLog for TracingInteractionLog {
    fn record_decision(&self, decision: &Decision) {
        info!(
            candidate_id = %decision.candidate_id,
            direction = %decision.direction,
            decided_at = %decision.decided_at,
            "swipe decision"
        );
    }
}

/// Surfaces notices as warnings when there is no UI to show them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn notify(&self, notice: Notice) {
        warn!(title = %notice.title, message = %notice.message, "user notice");
    }
}
