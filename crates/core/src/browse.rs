//! Free-text search for the list view

use kindred_domain::CandidateProfile;

/// Candidates whose name, location, school or any interest contains
/// `query`, ignoring case. An empty or blank query matches everyone.
pub fn search<'a>(candidates: &'a [CandidateProfile], query: &str) -> Vec<&'a CandidateProfile> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return candidates.iter().collect();
    }

    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
    candidates
        .iter()
        .filter(|candidate| {
            contains(&candidate.name)
                || candidate.location.as_deref().is_some_and(contains)
                || candidate.school.as_deref().is_some_and(contains)
                || candidate.interests.iter().any(|tag| contains(tag))
        })
        .collect()
}
