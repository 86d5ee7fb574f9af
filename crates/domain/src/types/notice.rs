//! User-visible notices

use serde::{Deserialize, Serialize};

use crate::errors::KindredError;

/// A short title/message pair surfaced to the user once per failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into() }
    }

    /// Notice for a failure while loading the profile.
    pub fn load_failed(err: &KindredError) -> Self {
        Self::new("Error", format!("Failed to load your profile: {err}"))
    }
}
