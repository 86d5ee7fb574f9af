//! Swipe decisions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::CandidateId;
use crate::impl_domain_key_conversions;

/// Direction of a committed swipe. Right is a like, left is a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl_domain_key_conversions!(SwipeDirection {
    Left => "left",
    Right => "right",
});

impl SwipeDirection {
    /// Direction implied by a horizontal offset; `None` at exactly zero.
    pub fn from_offset(dx: f32) -> Option<Self> {
        if dx > 0.0 {
            Some(Self::Right)
        } else if dx < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    pub fn is_like(self) -> bool {
        self == Self::Right
    }

    /// Sign applied to off-screen targets and rotation.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// One committed decision, reported to the interaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub candidate_id: CandidateId,
    pub direction: SwipeDirection,
    pub decided_at: DateTime<Utc>,
}

impl Decision {
    pub fn new(candidate_id: CandidateId, direction: SwipeDirection) -> Self {
        Self { candidate_id, direction, decided_at: Utc::now() }
    }
}
