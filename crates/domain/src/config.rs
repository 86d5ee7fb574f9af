//! Configuration structures
//!
//! Every section defaults sensibly so a partial JSON/TOML file (or none at
//! all) yields a usable configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_ROTATION_DEGREES, DEFAULT_SHUTDOWN_TIMEOUT_SECS, DEFAULT_SWIPE_THRESHOLD_FRACTION,
    DEFAULT_UPLOAD_TIMEOUT_SECS, DEFAULT_VIEWPORT_WIDTH, PROFILES_COLLECTION,
};

/// Root application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub swipe: SwipeConfig,
    pub autosave: AutosaveConfig,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

/// Horizontal distance a drag must exceed to commit a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SwipeThreshold {
    /// Fraction of the viewport width (e.g. `0.25`).
    Fraction(f32),
    /// Fixed distance in logical pixels (e.g. `120.0`).
    Fixed(f32),
}

impl SwipeThreshold {
    /// Resolve to logical pixels for the given viewport width.
    pub fn resolve(&self, viewport_width: f32) -> f32 {
        match *self {
            Self::Fraction(fraction) => (fraction * viewport_width).abs(),
            Self::Fixed(px) => px.abs(),
        }
    }
}

impl Default for SwipeThreshold {
    fn default() -> Self {
        Self::Fraction(DEFAULT_SWIPE_THRESHOLD_FRACTION)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub threshold: SwipeThreshold,
    pub viewport_width: f32,
    pub max_rotation_degrees: f32,
    /// Dual-category decks only keep candidates whose category interests
    /// intersect that category's option list.
    pub restrict_to_category_options: bool,
}

impl SwipeConfig {
    /// Commit threshold in logical pixels.
    pub fn threshold_px(&self) -> f32 {
        self.threshold.resolve(self.viewport_width)
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: SwipeThreshold::default(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            max_rotation_degrees: DEFAULT_MAX_ROTATION_DEGREES,
            restrict_to_category_options: false,
        }
    }
}

/// How a finished upload round competes with edits made while it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// A round result is dropped if its field was edited after the round was
    /// scheduled.
    #[default]
    NewestEdit,
    /// A round result always applies when it finishes, even over newer edits.
    LastApplied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    pub upload_timeout_secs: u64,
    pub merge_policy: MergePolicy,
    pub shutdown_timeout_secs: u64,
}

impl AutosaveConfig {
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            upload_timeout_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
            merge_policy: MergePolicy::default(),
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

/// Remote document/blob store endpoints. `None` selects the in-memory
/// backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub document_base_url: Option<String>,
    pub blob_base_url: Option<String>,
    pub collection: String,
    pub request_timeout_secs: u64,
    pub max_attempts: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            document_base_url: None,
            blob_base_url: None,
            collection: PROFILES_COLLECTION.to_string(),
            request_timeout_secs: 15,
            max_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_resolves_fraction_of_width() {
        let threshold = SwipeThreshold::Fraction(0.25);
        assert_eq!(threshold.resolve(400.0), 100.0);
        assert_eq!(SwipeThreshold::Fixed(120.0).resolve(400.0), 120.0);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [swipe]
            threshold = { kind = "fixed", value = 120.0 }

            [autosave]
            merge_policy = "last_applied"
            "#,
        )
        .unwrap();

        assert_eq!(config.swipe.threshold, SwipeThreshold::Fixed(120.0));
        assert_eq!(config.swipe.viewport_width, DEFAULT_VIEWPORT_WIDTH);
        assert_eq!(config.autosave.merge_policy, MergePolicy::LastApplied);
        assert_eq!(config.autosave.upload_timeout(), Duration::from_secs(30));
        assert_eq!(config.backend.collection, "profiles");
    }

    #[test]
    fn empty_json_is_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
