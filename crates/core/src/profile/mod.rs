//! Auto-saving profile editor
//!
//! [`AutoSaveStore`] holds the signed-in user's [`ProfileDocument`], applies
//! field edits synchronously and persists them in the background. Photo
//! fields additionally run upload rounds that swap local references for
//! durable ones.
//!
//! [`ProfileDocument`]: kindred_domain::ProfileDocument

pub mod ports;
pub mod session;
pub mod store;
pub mod upload;

pub use session::SessionContext;
pub use store::{AutoSaveStore, LoadOutcome, StoreDependencies};
pub use upload::{blob_key, RoundOutcome};
