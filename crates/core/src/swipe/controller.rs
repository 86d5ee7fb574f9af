//! Swipe deck controller
//!
//! Couples the gesture tracker to the deck session: a finished commit
//! animation advances the cursor and reports the decision. Filter and mode
//! changes rebuild the deck and drop any gesture in progress.

use std::sync::Arc;

use kindred_domain::constants::ALL_INTERESTS;
use kindred_domain::{CandidateProfile, Category, Decision, Result, SwipeConfig, SwipeDirection};
use tracing::{debug, info, instrument};

use super::deck::SwipeSession;
use super::gesture::{self, CardOffset, CardState, GestureTracker, Release};
use super::ports::{InteractionLog, ProfileSource};
use crate::selection::SelectionModel;

pub struct SwipeDeckController {
    session: SwipeSession,
    gesture: GestureTracker,
    filter: SelectionModel,
    config: SwipeConfig,
    interactions: Arc<dyn InteractionLog>,
}

impl SwipeDeckController {
    pub fn new(
        candidates: Vec<CandidateProfile>,
        mode: Option<Category>,
        config: SwipeConfig,
        interactions: Arc<dyn InteractionLog>,
    ) -> Self {
        let session = SwipeSession::new(candidates, mode)
            .with_category_restriction(config.restrict_to_category_options);
        let gesture = GestureTracker::new(config.threshold_px());
        Self { session, gesture, filter: filter_model(mode), config, interactions }
    }

    /// Build a controller from the candidates currently offered by `source`.
    #[instrument(skip_all, fields(mode = ?mode))]
    pub async fn from_source(
        source: &dyn ProfileSource,
        mode: Option<Category>,
        config: SwipeConfig,
        interactions: Arc<dyn InteractionLog>,
    ) -> Result<Self> {
        let candidates = source.list_candidates().await?;
        info!(candidates = candidates.len(), "swipe deck loaded");
        Ok(Self::new(candidates, mode, config, interactions))
    }

    pub fn session(&self) -> &SwipeSession {
        &self.session
    }

    pub fn state(&self) -> CardState {
        self.gesture.state()
    }

    pub fn current(&self) -> Option<&CandidateProfile> {
        self.session.current()
    }

    pub fn is_exhausted(&self) -> bool {
        self.session.is_exhausted()
    }

    pub fn threshold_px(&self) -> f32 {
        self.gesture.threshold_px()
    }

    /// Current card offset and rotation, for rendering.
    pub fn card_transform(&self) -> (CardOffset, f32) {
        let offset = self.gesture.state().offset();
        let rotation =
            gesture::rotation_degrees(offset.dx, self.config.viewport_width, self.config.max_rotation_degrees);
        (offset, rotation)
    }

    /// Horizontal target of the running commit animation, if any.
    pub fn commit_target_x(&self) -> Option<f32> {
        match self.gesture.state() {
            CardState::Committing { direction, .. } => {
                Some(gesture::offscreen_target_x(direction, self.config.viewport_width))
            }
            _ => None,
        }
    }

    // Gesture input

    pub fn begin_drag(&mut self) -> bool {
        if self.session.is_exhausted() {
            return false;
        }
        self.gesture.begin()
    }

    pub fn drag_to(&mut self, dx: f32, dy: f32) -> bool {
        self.gesture.move_to(CardOffset::new(dx, dy))
    }

    pub fn release(&mut self) -> Option<Release> {
        let release = self.gesture.release()?;
        debug!(?release, threshold_px = self.gesture.threshold_px(), "drag released");
        Some(release)
    }

    /// Pass button.
    pub fn pass(&mut self) -> bool {
        self.commit(SwipeDirection::Left)
    }

    /// Like button.
    pub fn like(&mut self) -> bool {
        self.commit(SwipeDirection::Right)
    }

    fn commit(&mut self, direction: SwipeDirection) -> bool {
        if self.session.is_exhausted() {
            return false;
        }
        self.gesture.commit(direction)
    }

    /// The running card animation finished.
    ///
    /// After a commit the cursor advances and the decision is reported.
    pub fn complete_animation(&mut self) -> Option<Decision> {
        let Release::Commit(direction) = self.gesture.finish_animation()? else {
            return None;
        };
        let candidate = self.session.advance()?;
        let decision = Decision::new(candidate.id, direction);
        debug!(
            candidate_id = %decision.candidate_id,
            direction = %direction,
            remaining = self.session.remaining(),
            "swipe committed"
        );
        self.interactions.record_decision(&decision);
        Some(decision)
    }

    // Filtering

    /// Interest options offered by the filter for the current mode.
    pub fn filter(&self) -> &SelectionModel {
        &self.filter
    }

    pub fn toggle_filter_tag(&mut self, tag: &str) -> bool {
        let selected = self.filter.toggle(tag);
        self.apply_filter();
        selected
    }

    pub fn set_filter<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = self.filter.clone().with_selected(tags);
        self.apply_filter();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.gesture.cancel();
        self.session.set_filter(self.filter.selected());
        debug!(filter = ?self.session.active_filter(), deck = self.session.len(), "deck filtered");
    }

    /// Switch category. The filter options follow the mode and the
    /// selection is cleared.
    pub fn set_mode(&mut self, mode: Option<Category>) {
        self.gesture.cancel();
        self.filter = filter_model(mode);
        self.session.set_filter(std::iter::empty::<&str>());
        self.session.set_mode(mode);
        debug!(mode = ?mode, deck = self.session.len(), "deck mode changed");
    }

    /// Start over with the current filter and mode.
    pub fn reset(&mut self) {
        self.gesture.cancel();
        self.session.reset();
    }
}

fn filter_model(mode: Option<Category>) -> SelectionModel {
    match mode {
        Some(category) => SelectionModel::from_static(category.config().interest_options),
        None => SelectionModel::from_static(ALL_INTERESTS),
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingLog(Mutex<Vec<Decision>>);

    impl InteractionLog for RecordingLog {
        fn record_decision(&self, decision: &Decision) {
            self.0.lock().push(decision.clone());
        }
    }

    fn controller() -> (SwipeDeckController, Arc<RecordingLog>) {
        let log = Arc::new(RecordingLog::default());
        let candidates = vec![
            CandidateProfile::new(1u64, "Liana", 24).with_interests(["Tech", "Art"]),
            CandidateProfile::new(2u64, "Alex", 23).with_interests(["Finance"]),
        ];
        let config = SwipeConfig { viewport_width: 400.0, ..SwipeConfig::default() };
        (SwipeDeckController::new(candidates, None, config, log.clone()), log)
    }

    #[test]
    fn drag_commit_advances_and_logs() {
        let (mut deck, log) = controller();
        assert_eq!(deck.threshold_px(), 100.0);

        assert!(deck.begin_drag());
        deck.drag_to(-150.0, 10.0);
        assert!(deck.card_transform().1 < 0.0);
        assert_eq!(deck.release(), Some(Release::Commit(SwipeDirection::Left)));
        assert_eq!(deck.commit_target_x(), Some(-400.0));

        let decision = deck.complete_animation().unwrap();
        assert_eq!(decision.candidate_id.as_str(), "1");
        assert_eq!(deck.session().cursor(), 1);
        assert_eq!(log.0.lock().len(), 1);
    }

    #[test]
    fn return_animation_keeps_cursor() {
        let (mut deck, log) = controller();
        deck.begin_drag();
        deck.drag_to(60.0, 0.0);
        assert_eq!(deck.release(), Some(Release::Return));
        assert_eq!(deck.complete_animation(), None);
        assert_eq!(deck.session().cursor(), 0);
        assert_eq!(deck.state(), CardState::Idle);
        assert!(log.0.lock().is_empty());
    }

    #[test]
    fn buttons_are_rejected_when_exhausted() {
        let (mut deck, _log) = controller();
        for _ in 0..2 {
            assert!(deck.like());
            deck.complete_animation();
        }
        assert!(deck.is_exhausted());
        assert!(!deck.like());
        assert!(!deck.begin_drag());

        deck.reset();
        assert!(!deck.is_exhausted());
        assert_eq!(deck.session().len(), 2);
    }

    #[test]
    fn filter_toggle_rebuilds_and_cancels_gesture() {
        let (mut deck, _log) = controller();
        deck.like();
        deck.complete_animation();
        deck.begin_drag();

        assert!(deck.toggle_filter_tag("finance"));
        assert_eq!(deck.state(), CardState::Idle);
        assert_eq!(deck.session().cursor(), 0);
        assert_eq!(deck.current().map(|c| c.name.as_str()), Some("Alex"));

        deck.clear_filter();
        assert_eq!(deck.session().len(), 2);
    }

    #[test]
    fn mode_switch_swaps_filter_options() {
        let (mut deck, _log) = controller();
        deck.set_filter(["Tech"]);
        deck.set_mode(Some(Category::Social));
        assert!(deck.filter().is_empty());
        assert!(deck.filter().options().iter().any(|o| o == "Clubbing"));
        assert_eq!(deck.session().mode(), Some(Category::Social));
    }
}
