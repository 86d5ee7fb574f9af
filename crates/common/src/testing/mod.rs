//! Testing utilities and helpers
//!
//! - **[`async_utils`]**: async test helpers for eventually-consistent state
//!
//! ```rust,ignore
//! kindred_common::assert_eventually_async!(Duration::from_secs(1), async {
//!     store.remote_value("name").await == Some(json!("Alexa"))
//! });
//! ```

pub mod async_utils;

pub use async_utils::{poll_until, timeout_ok};
