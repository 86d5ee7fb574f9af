//! Error types shared by the Kindred crates
//!
//! Failure shapes that more than one crate produces live here once. Module
//! errors absorb them through `From`:
//!
//! ```rust,ignore
//! impl From<CommonError> for KindredError {
//!     fn from(err: CommonError) -> Self {
//!         match err {
//!             CommonError::Timeout { .. } => Self::Timeout(err.to_string()),
//!         }
//!     }
//! }
//! ```

use std::fmt;
use std::time::Duration;

/// Standard result type using CommonError
pub type CommonResult<T> = Result<T, CommonError>;

/// Common error variants that appear across multiple crates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// A bounded wait ran out before the work finished.
    Timeout { operation: String, duration: Duration },
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { operation, duration } => {
                write!(f, "Operation '{}' timed out after {:?}", operation, duration)
            }
        }
    }
}

impl std::error::Error for CommonError {}

impl CommonError {
    /// Create a timeout error
    pub fn timeout<S: Into<String>>(operation: S, duration: Duration) -> Self {
        Self::Timeout { operation: operation.into(), duration }
    }
}
