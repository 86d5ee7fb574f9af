//! Scripted session exercising the deck and the profile store end to end.
//!
//! Signs a demo user in, swipes through part of the sample deck with drag
//! gestures and buttons, narrows the deck with a filter, edits and saves the
//! profile, then signs out.

use std::time::Duration;

use kindred_core::LoadOutcome;
use kindred_domain::{Decision, ProfileDocument, ProfileField, Result, UserIdentity};
use tracing::{info, warn};

use crate::context::AppContext;
use crate::utils::logging::error_label;

pub const DEMO_USER_ID: &str = "demo-user";

/// What the scripted session did.
#[derive(Debug, Clone)]
pub struct DemoSummary {
    pub load: Option<LoadOutcome>,
    pub decisions: Vec<Decision>,
    /// Cards left in the filtered deck when browsing stopped.
    pub remaining: usize,
    pub saved: bool,
    /// Profile as it stood just before signing out.
    pub profile: ProfileDocument,
}

pub async fn run(ctx: &AppContext) -> Result<DemoSummary> {
    let user = UserIdentity::new(DEMO_USER_ID).with_email("demo@kindred.local");
    let load = ctx.sign_in(user).await;
    info!(outcome = ?load, "demo user signed in");

    let (decisions, remaining) = browse(ctx).await?;

    let store = &ctx.store;
    store.set_field(ProfileField::Name, "Avery")?;
    store.set_field(ProfileField::Age, "27")?;
    store.set_field(ProfileField::Location, "Oakland")?;
    store.toggle_tag(ProfileField::SocialInterests, "Boba")?;
    store.toggle_tag(ProfileField::SocialInterests, "Cycling")?;
    store.set_field(ProfileField::PromptResponse, "Sunday farmers markets")?;

    let saved = match store.save_now().await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, error_kind = error_label(&err), "demo save failed");
            false
        }
    };
    store.settle(Duration::from_secs(5)).await?;
    let profile = store.document();

    ctx.sign_out().await;
    info!(decisions = decisions.len(), remaining, saved, "demo session finished");

    Ok(DemoSummary { load, decisions, remaining, saved, profile })
}

/// Like the first card by dragging, pass the second by button, then filter
/// and like the first match.
async fn browse(ctx: &AppContext) -> Result<(Vec<Decision>, usize)> {
    let mut deck = ctx.swipe_deck(None).await?;
    let mut decisions = Vec::new();

    let past_threshold = deck.threshold_px() + 40.0;
    if deck.begin_drag() {
        deck.drag_to(past_threshold * 0.5, 4.0);
        deck.drag_to(past_threshold, 8.0);
        deck.release();
        decisions.extend(deck.complete_animation());
    }

    if deck.pass() {
        decisions.extend(deck.complete_animation());
    }

    deck.set_filter(["Music", "AI"]);
    if deck.like() {
        decisions.extend(deck.complete_animation());
    }

    Ok((decisions, deck.session().remaining()))
}
