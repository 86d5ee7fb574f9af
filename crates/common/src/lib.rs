//! Modular common utilities shared across Kindred crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: shared error types
//! - `runtime`: async infrastructure (scoped task lifecycle)
//! - `test-utils`: async test helpers

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod error;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod lifecycle;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

#[cfg(feature = "foundation")]
pub use error::{CommonError, CommonResult};
#[cfg(feature = "runtime")]
pub use lifecycle::TaskScope;
