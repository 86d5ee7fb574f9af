//! Browsable candidate profiles
//!
//! Candidates are read-only records supplied by the profile source.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Stable candidate identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for CandidateId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// One browsable person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub id: CandidateId,
    pub name: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Display order is preserved; matching treats it as a set.
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_interests: Option<Vec<String>>,
    /// Record belongs to the signed-in user and is never shown in a deck.
    #[serde(default)]
    pub owner: bool,
}

impl CandidateProfile {
    pub fn new(id: impl Into<CandidateId>, name: impl Into<String>, age: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            location: None,
            school: None,
            bio: None,
            photo: None,
            interests: Vec::new(),
            social_interests: None,
            professional_interests: None,
            owner: false,
        }
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category_interests<I, S>(mut self, category: Category, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = Some(interests.into_iter().map(Into::into).collect());
        match category {
            Category::Social => self.social_interests = tags,
            Category::Professional => self.professional_interests = tags,
        }
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    pub fn as_owner(mut self) -> Self {
        self.owner = true;
        self
    }

    /// Interest set relevant to `mode`: the category-specific list when
    /// present, otherwise the generic `interests`.
    pub fn interests_for(&self, mode: Option<Category>) -> &[String] {
        let specific = match mode {
            Some(Category::Social) => self.social_interests.as_deref(),
            Some(Category::Professional) => self.professional_interests.as_deref(),
            None => None,
        };
        specific.unwrap_or(&self.interests)
    }
}
