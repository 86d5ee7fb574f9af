use kindred_domain::{KindredError, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Fails if the filter does not
/// parse or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), KindredError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|err| {
            KindredError::Config(format!("invalid log level '{}': {err}", config.level))
        })?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(|err| KindredError::Internal(format!("failed to install logger: {err}")))
}

/// Convert a `KindredError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &KindredError) -> &'static str {
    match error {
        KindredError::Unavailable(_) => "unavailable",
        KindredError::Network(_) => "network",
        KindredError::Storage(_) => "storage",
        KindredError::Auth(_) => "auth",
        KindredError::NotFound(_) => "not_found",
        KindredError::InvalidInput(_) => "invalid_input",
        KindredError::Config(_) => "config",
        KindredError::Timeout(_) => "timeout",
        KindredError::Internal(_) => "internal",
    }
}
