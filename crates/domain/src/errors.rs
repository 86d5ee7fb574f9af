//! Error types used throughout the application

use kindred_common::error::CommonError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Kindred
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum KindredError {
    /// Backend unreachable or reporting itself unavailable (offline).
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KindredError {
    /// Transient/offline failures: swallowed on the load path, never retried
    /// automatically.
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }

    /// Stable label suitable for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::Network(_) => "network",
            Self::Storage(_) => "storage",
            Self::Auth(_) => "auth",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
            Self::Timeout(_) => "timeout",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<CommonError> for KindredError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Timeout { .. } => Self::Timeout(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for KindredError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(format!("invalid document payload: {err}"))
    }
}

/// Result type alias for Kindred operations
pub type Result<T> = std::result::Result<T, KindredError>;
