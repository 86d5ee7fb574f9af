//! Gesture-driven card swiping
//!
//! [`gesture`] turns drag offsets into commit/return decisions, [`deck`]
//! owns the filtered candidate sequence and cursor, and [`controller`] wires
//! both to the interaction log.

pub mod controller;
pub mod deck;
pub mod gesture;
pub mod ports;

pub use controller::SwipeDeckController;
pub use deck::SwipeSession;
pub use gesture::{offscreen_target_x, rotation_degrees, CardOffset, CardState, GestureTracker, Release};
