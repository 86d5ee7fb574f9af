//! Lifecycle management utilities for async components
//!
//! - **[`tasks`]**: cancellation-scoped task groups with bounded shutdown

pub mod tasks;

pub use tasks::TaskScope;
