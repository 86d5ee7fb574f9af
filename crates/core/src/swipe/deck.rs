//! Deck of candidates for one browsing pass
//!
//! The deck is rebuilt from the candidate source whenever the filter or the
//! mode changes, and the cursor goes back to 0 each time. Progress through
//! the previous deck is discarded.

use std::collections::BTreeSet;

use kindred_domain::{fold_tag, CandidateProfile, Category};

/// Whether `candidate` belongs in a deck filtered by `filter`.
///
/// `filter` must hold tags already passed through [`fold_tag`]. An empty filter admits everyone;
/// otherwise the candidate's interests for `mode` must share a tag with it.
pub fn matches_filter(candidate: &CandidateProfile, filter: &BTreeSet<String>, mode: Option<Category>) -> bool {
    filter.is_empty()
        || candidate.interests_for(mode).iter().any(|tag| filter.contains(&fold_tag(tag)))
}

/// Whether the candidate has any interest offered by `category`.
fn relevant_to_category(candidate: &CandidateProfile, category: Category) -> bool {
    let config = category.config();
    candidate.interests_for(Some(category)).iter().any(|tag| config.offers_interest(tag))
}

/// Transient state of one browsing pass.
#[derive(Debug, Clone)]
pub struct SwipeSession {
    source: Vec<CandidateProfile>,
    deck: Vec<CandidateProfile>,
    cursor: usize,
    active_filter: BTreeSet<String>,
    mode: Option<Category>,
    restrict_to_category_options: bool,
}

impl SwipeSession {
    /// Start a session over `candidates`. Owner records are dropped.
    pub fn new(candidates: Vec<CandidateProfile>, mode: Option<Category>) -> Self {
        let source = candidates.into_iter().filter(|candidate| !candidate.owner).collect();
        let mut session = Self {
            source,
            deck: Vec::new(),
            cursor: 0,
            active_filter: BTreeSet::new(),
            mode,
            restrict_to_category_options: false,
        };
        session.rebuild();
        session
    }

    /// Keep only candidates relevant to the active category's option list.
    /// Has no effect without a mode.
    pub fn with_category_restriction(mut self, enabled: bool) -> Self {
        self.restrict_to_category_options = enabled;
        self.rebuild();
        self
    }

    fn rebuild(&mut self) {
        let mode = self.mode;
        let restrict = self.restrict_to_category_options;
        let filter = &self.active_filter;
        self.deck = self
            .source
            .iter()
            .filter(|candidate| match (restrict, mode) {
                (true, Some(category)) => relevant_to_category(candidate, category),
                _ => true,
            })
            .filter(|candidate| matches_filter(candidate, filter, mode))
            .cloned()
            .collect();
        self.cursor = 0;
    }

    pub fn deck(&self) -> &[CandidateProfile] {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> Option<Category> {
        self.mode
    }

    /// Active filter tags, case-folded.
    pub fn active_filter(&self) -> &BTreeSet<String> {
        &self.active_filter
    }

    /// Topmost undecided candidate.
    pub fn current(&self) -> Option<&CandidateProfile> {
        self.deck.get(self.cursor)
    }

    /// Candidates after the current one, for rendering the stack beneath it.
    pub fn upcoming(&self) -> &[CandidateProfile] {
        self.deck.get(self.cursor + 1..).unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.cursor)
    }

    /// Terminal "no more candidates" condition.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.deck.len()
    }

    /// Move past the current candidate and return it.
    pub fn advance(&mut self) -> Option<CandidateProfile> {
        let decided = self.deck.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(decided)
    }

    /// Replace the filter. Always rebuilds the deck and resets the cursor.
    pub fn set_filter<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.active_filter = tags.into_iter().map(|tag| fold_tag(tag.as_ref())).collect();
        self.rebuild();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(std::iter::empty::<&str>());
    }

    /// Switch category. Always rebuilds the deck and resets the cursor.
    pub fn set_mode(&mut self, mode: Option<Category>) {
        self.mode = mode;
        self.rebuild();
    }

    /// Leave exhaustion: rebuild with the current filter and mode.
    pub fn reset(&mut self) {
        self.rebuild();
    }

    /// Replace the candidate source, keeping filter and mode.
    pub fn replace_source(&mut self, candidates: Vec<CandidateProfile>) {
        self.source = candidates.into_iter().filter(|candidate| !candidate.owner).collect();
        self.rebuild();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<CandidateProfile> {
        vec![
            CandidateProfile::new(1u64, "Liana", 24).with_interests(["Tech", "Art"]),
            CandidateProfile::new(2u64, "Alex", 23).with_interests(["Finance", "Sports"]),
            CandidateProfile::new(3u64, "Sam", 22).with_interests(Vec::<String>::new()),
            CandidateProfile::new(99u64, "Me", 25).with_interests(["Art"]).as_owner(),
        ]
    }

    #[test]
    fn owner_records_never_enter_the_deck() {
        let session = SwipeSession::new(candidates(), None);
        assert_eq!(session.len(), 3);
        assert!(session.deck().iter().all(|candidate| !candidate.owner));
    }

    #[test]
    fn filter_matches_case_insensitively() {
        let mut session = SwipeSession::new(candidates(), None);
        session.set_filter(["art"]);
        let names: Vec<&str> = session.deck().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Liana"]);
    }

    #[test]
    fn non_ascii_filter_tags_fold() {
        let people = vec![CandidateProfile::new(7u64, "Noa", 29).with_interests(["Café"])];
        let mut session = SwipeSession::new(people, None);
        session.set_filter(["CAFÉ"]);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn empty_interests_only_pass_an_empty_filter() {
        let mut session = SwipeSession::new(candidates(), None);
        assert!(session.deck().iter().any(|c| c.name == "Sam"));
        session.set_filter(["Sports"]);
        assert!(session.deck().iter().all(|c| c.name != "Sam"));
    }

    #[test]
    fn filter_change_resets_cursor() {
        let mut session = SwipeSession::new(candidates(), None);
        session.advance();
        session.advance();
        assert_eq!(session.cursor(), 2);

        session.set_filter(["tech", "finance"]);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn exhaustion_and_reset() {
        let mut session = SwipeSession::new(candidates(), None);
        while session.advance().is_some() {}
        assert!(session.is_exhausted());
        assert_eq!(session.remaining(), 0);
        assert!(session.current().is_none());

        session.reset();
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn empty_source_is_immediately_exhausted() {
        let session = SwipeSession::new(Vec::new(), None);
        assert!(session.is_exhausted());
        assert!(session.upcoming().is_empty());
    }

    #[test]
    fn mode_selects_category_interests() {
        let people = vec![
            CandidateProfile::new(1u64, "Jordan", 25)
                .with_interests(["Gaming"])
                .with_category_interests(Category::Professional, ["AI"]),
            CandidateProfile::new(2u64, "Taylor", 21).with_interests(["AI"]),
        ];
        let mut session = SwipeSession::new(people, Some(Category::Social));
        session.set_filter(["ai"]);
        assert_eq!(session.len(), 1);
        assert_eq!(session.deck()[0].name, "Taylor");

        session.set_mode(Some(Category::Professional));
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn category_restriction_drops_irrelevant_candidates() {
        let people = vec![
            CandidateProfile::new(1u64, "Casey", 26).with_category_interests(Category::Social, ["Clubbing"]),
            CandidateProfile::new(2u64, "Riley", 24).with_interests(["Knitting"]),
        ];
        let session = SwipeSession::new(people, Some(Category::Social)).with_category_restriction(true);
        assert_eq!(session.len(), 1);
        assert_eq!(session.deck()[0].name, "Casey");
    }
}
