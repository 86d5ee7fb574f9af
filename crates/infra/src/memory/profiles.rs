//! Fixed candidate list used when no remote profile source is configured.

use async_trait::async_trait;
use kindred_core::ProfileSource;
use kindred_domain::{CandidateId, CandidateProfile, Result};
use parking_lot::RwLock;
use tracing::info;

const UNKNOWN: &str = "Unknown";
const FALLBACK_AGE: u32 = 18;

/// Profile source over an in-process list.
#[derive(Debug, Default)]
pub struct StaticProfileSource {
    profiles: RwLock<Vec<CandidateProfile>>,
}

impl StaticProfileSource {
    pub fn new(profiles: Vec<CandidateProfile>) -> Self {
        Self { profiles: RwLock::new(profiles) }
    }

    /// The eight built-in sample candidates.
    pub fn sample() -> Self {
        let sample = [
            (1u64, "Liana", 24, "San Francisco", "UC Berkeley", ["Tech", "Art"]),
            (2, "Alex", 23, "New York", "NYU", ["Finance", "Sports"]),
            (3, "Sam", 22, "Los Angeles", "UCLA", ["Music", "Travel"]),
            (4, "Jordan", 25, "Chicago", "Northwestern", ["Gaming", "AI"]),
            (5, "Taylor", 21, "Boston", "MIT", ["Books", "Robotics"]),
            (6, "Casey", 26, "Seattle", "University of Washington", ["Cooking", "Outdoors"]),
            (7, "Riley", 24, "Austin", "UT Austin", ["Photography", "Dance"]),
            (8, "Jamie", 23, "Portland", "Portland State", ["Design", "Boba"]),
        ];

        Self::new(
            sample
                .into_iter()
                .map(|(id, name, age, location, school, interests)| {
                    CandidateProfile::new(id, name, age)
                        .with_location(location)
                        .with_school(school)
                        .with_interests(interests)
                })
                .collect(),
        )
    }

    /// Add the signed-in user's own record.
    ///
    /// The record gets the next numeric id and is marked as owned, so decks
    /// never show it. Age 0 becomes 18; missing location and school become
    /// "Unknown".
    pub fn add_owner_profile(&self, mut profile: CandidateProfile) -> CandidateId {
        let mut profiles = self.profiles.write();
        let next = profiles.iter().filter_map(|p| p.id.as_str().parse::<u64>().ok()).max().unwrap_or(0) + 1;

        profile.id = CandidateId::from(next);
        profile.owner = true;
        if profile.age == 0 {
            profile.age = FALLBACK_AGE;
        }
        profile.location.get_or_insert_with(|| UNKNOWN.to_string());
        profile.school.get_or_insert_with(|| UNKNOWN.to_string());

        info!(candidate_id = %profile.id, "owner profile added");
        let id = profile.id.clone();
        profiles.push(profile);
        id
    }

    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileSource for StaticProfileSource {
    async fn list_candidates(&self) -> Result<Vec<CandidateProfile>> {
        Ok(self.profiles.read().clone())
    }
}
