//! # Kindred Domain
//!
//! Business domain types and models for Kindred.
//!
//! This crate contains:
//! - Candidate, category, swipe and profile document types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Option lists and other domain constants
//!
//! ## Architecture
//! - Depends only on `kindred-common` (foundation tier) for error classification
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
