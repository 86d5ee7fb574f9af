//! # Kindred App
//!
//! Application shell around the swipe deck and the auto-saving profile
//! store.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Logging setup
//! - A scripted demo session driven by the `kindred` binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Picks REST or in-memory adapters from configuration

pub mod context;
pub mod demo;
pub mod utils;

pub use context::*;
