//! # Kindred Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The swipe gesture state machine, deck session and controller
//! - The auto-saving profile store with background photo upload rounds
//! - Port/adapter interfaces (traits) for every external collaborator
//!
//! ## Architecture Principles
//! - Only depends on `kindred-common` and `kindred-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod browse;
pub mod profile;
pub mod selection;
pub mod swipe;

// Re-export specific items to avoid ambiguity
pub use profile::ports::{AssetReader, AuthProvider, BlobStore, Document, DocumentStore, NoticeSink};
pub use profile::{AutoSaveStore, LoadOutcome, SessionContext, StoreDependencies};
pub use selection::SelectionModel;
pub use swipe::ports::{InteractionLog, ProfileSource};
pub use swipe::{CardOffset, CardState, GestureTracker, Release, SwipeDeckController, SwipeSession};
