//! Conversions from external infrastructure errors into domain errors.

use kindred_domain::KindredError;
use reqwest::Error as HttpError;
use reqwest::StatusCode;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub KindredError);

impl From<InfraError> for KindredError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<KindredError> for InfraError {
    fn from(value: KindredError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoKindredError {
    fn into_kindred(self) -> KindredError;
}

/* -------------------------------------------------------------------------- */
/* HTTP status → KindredError */
/* -------------------------------------------------------------------------- */

/// Map a non-success status to the domain taxonomy.
///
/// 503 means the backend is offline; callers decide separately what a 404
/// means for them.
pub fn status_error(status: StatusCode, context: &str) -> KindredError {
    let message = format!(
        "{context}: HTTP {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("unknown status")
    );

    match status.as_u16() {
        401 | 403 => KindredError::Auth(message),
        404 => KindredError::NotFound(message),
        503 => KindredError::Unavailable(message),
        _ => KindredError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → KindredError */
/* -------------------------------------------------------------------------- */

impl IntoKindredError for HttpError {
    fn into_kindred(self) -> KindredError {
        if self.is_timeout() {
            return KindredError::Unavailable(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return KindredError::Unavailable(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            return status_error(status, "HTTP request failed");
        }

        if self.is_builder() {
            return KindredError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return KindredError::Storage(format!("invalid response body: {self}"));
        }

        KindredError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_kindred())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
