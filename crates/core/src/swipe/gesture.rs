//! Swipe gesture state machine
//!
//! One tracker follows the card currently on top of the deck:
//!
//! ```text
//! Idle --begin--> Dragging --release(|dx| > threshold)--> Committing --finish--> Idle
//!                     |                                                         ^
//!                     +----release(|dx| <= threshold)--> Returning --finish-----+
//! ```
//!
//! Offsets are cumulative from the point where the gesture started.

use kindred_domain::SwipeDirection;

/// Card displacement from its resting position, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardOffset {
    pub dx: f32,
    pub dy: f32,
}

impl CardOffset {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardState {
    /// Card at rest, no active gesture.
    Idle,
    /// Pointer down; offset tracked continuously.
    Dragging { offset: CardOffset },
    /// Released past the threshold; animating off-screen.
    Committing { direction: SwipeDirection, from: CardOffset },
    /// Released under the threshold; animating back to rest.
    Returning { from: CardOffset },
}

impl CardState {
    /// Offset the card is rendered at while in this state.
    pub fn offset(&self) -> CardOffset {
        match *self {
            Self::Idle => CardOffset::ZERO,
            Self::Dragging { offset } => offset,
            Self::Committing { from, .. } | Self::Returning { from } => from,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, Self::Committing { .. } | Self::Returning { .. })
    }
}

/// Outcome of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Commit(SwipeDirection),
    Return,
}

/// Decide a release. Commits only when `|dx|` is strictly greater than the
/// threshold.
pub fn decide_release(dx: f32, threshold_px: f32) -> Release {
    if dx.abs() > threshold_px {
        match SwipeDirection::from_offset(dx) {
            Some(direction) => Release::Commit(direction),
            None => Release::Return,
        }
    } else {
        Release::Return
    }
}

/// Card rotation for a horizontal offset.
///
/// Linear in `dx`, reaching `±max_degrees` at half the viewport width and
/// clamped beyond it. Odd and non-decreasing in `dx`.
pub fn rotation_degrees(dx: f32, viewport_width: f32, max_degrees: f32) -> f32 {
    let half_width = viewport_width.abs() / 2.0;
    if half_width <= f32::EPSILON || dx.is_nan() {
        return 0.0;
    }
    (dx / half_width).clamp(-1.0, 1.0) * max_degrees.abs()
}

/// Horizontal position a committed card animates to.
pub fn offscreen_target_x(direction: SwipeDirection, viewport_width: f32) -> f32 {
    direction.sign() * viewport_width.abs()
}

/// Gesture tracker for the top card.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    threshold_px: f32,
    state: CardState,
}

impl GestureTracker {
    pub fn new(threshold_px: f32) -> Self {
        Self { threshold_px: threshold_px.abs(), state: CardState::Idle }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn threshold_px(&self) -> f32 {
        self.threshold_px
    }

    /// `Idle -> Dragging`. Ignored in any other state.
    pub fn begin(&mut self) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        self.state = CardState::Dragging { offset: CardOffset::ZERO };
        true
    }

    /// `Dragging -> Dragging` with the new cumulative offset.
    pub fn move_to(&mut self, offset: CardOffset) -> bool {
        match &mut self.state {
            CardState::Dragging { offset: current } => {
                *current = offset;
                true
            }
            _ => false,
        }
    }

    /// `Dragging -> Committing | Returning`.
    pub fn release(&mut self) -> Option<Release> {
        let CardState::Dragging { offset } = self.state else {
            return None;
        };
        let release = decide_release(offset.dx, self.threshold_px);
        self.state = match release {
            Release::Commit(direction) => CardState::Committing { direction, from: offset },
            Release::Return => CardState::Returning { from: offset },
        };
        Some(release)
    }

    /// Commit without a drag, as the pass/like buttons do.
    ///
    /// Allowed from `Idle` or mid-drag; ignored while an animation runs.
    pub fn commit(&mut self, direction: SwipeDirection) -> bool {
        let from = match self.state {
            CardState::Idle => CardOffset::ZERO,
            CardState::Dragging { offset } => offset,
            CardState::Committing { .. } | CardState::Returning { .. } => return false,
        };
        self.state = CardState::Committing { direction, from };
        true
    }

    /// `Committing | Returning -> Idle`.
    ///
    /// Returns the committed direction when a commit animation finished.
    pub fn finish_animation(&mut self) -> Option<Release> {
        let finished = match self.state {
            CardState::Committing { direction, .. } => Release::Commit(direction),
            CardState::Returning { .. } => Release::Return,
            CardState::Idle | CardState::Dragging { .. } => return None,
        };
        self.state = CardState::Idle;
        Some(finished)
    }

    /// Drop any gesture in progress.
    pub fn cancel(&mut self) {
        self.state = CardState::Idle;
    }
}
