//! Domain types and models

pub mod candidate;
pub mod category;
pub mod notice;
pub mod profile;
pub mod swipe;
pub mod user;

pub use candidate::{CandidateId, CandidateProfile};
pub use category::{fold_tag, same_tag, Category, CategoryConfig};
pub use notice::Notice;
pub use profile::{FieldKind, FieldValue, PhotoRef, PhotoSlots, ProfileDocument, ProfileField};
pub use swipe::{Decision, SwipeDirection};
pub use user::UserIdentity;
