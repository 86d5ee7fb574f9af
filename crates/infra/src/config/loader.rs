//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when both backend URLs are set
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//! 3. Otherwise built-in defaults (in-memory backends)
//!
//! ## Environment Variables
//! - `KINDRED_DOCUMENT_URL` (required): document store base URL
//! - `KINDRED_BLOB_URL` (required): blob store base URL
//! - `KINDRED_COLLECTION`: document collection name
//! - `KINDRED_SWIPE_THRESHOLD_FRACTION`: commit threshold as a fraction of
//!   the viewport width
//! - `KINDRED_SWIPE_THRESHOLD_PX`: fixed commit threshold; wins over the
//!   fraction when both are set
//! - `KINDRED_UPLOAD_TIMEOUT_SECS`: upload round timeout
//! - `KINDRED_MERGE_POLICY`: `newest_edit` or `last_applied`
//! - `KINDRED_LOG_LEVEL`: default tracing filter
//! - `KINDRED_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! `kindred.{json,toml}` then `config.{json,toml}`, looked up in the working
//! directory, its two parents, and the same three levels around the
//! executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use kindred_domain::{Config, KindredError, MergePolicy, Result, SwipeThreshold};

const FILE_NAMES: &[&str] = &["kindred.json", "kindred.toml", "config.json", "config.toml"];
const SEARCH_DIRS: &[&str] = &[".", "..", "../.."];

/// Load configuration with automatic fallback.
///
/// Environment first; if a required variable is missing, the probed config
/// file; if there is none, defaults. An invalid value in either source is an
/// error rather than a silent fallback.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(MissingOrInvalid::Missing(key)) => {
            tracing::debug!(missing = key, "environment incomplete, trying config file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("no config file found; using defaults with in-memory backends");
                    Ok(Config::default())
                }
            }
        }
        Err(MissingOrInvalid::Invalid(err)) => Err(err),
    }
}

/// Why [`load_from_env`] could not produce a config.
#[derive(Debug)]
pub enum MissingOrInvalid {
    /// A required variable is not set.
    Missing(&'static str),
    /// A variable is set to something unparseable.
    Invalid(KindredError),
}

impl From<MissingOrInvalid> for KindredError {
    fn from(value: MissingOrInvalid) -> Self {
        match value {
            MissingOrInvalid::Missing(key) => {
                KindredError::Config(format!("Missing required environment variable: {key}"))
            }
            MissingOrInvalid::Invalid(err) => err,
        }
    }
}

/// Load configuration from `KINDRED_*` environment variables.
///
/// Both backend URLs are required; everything else falls back to defaults.
pub fn load_from_env() -> std::result::Result<Config, MissingOrInvalid> {
    let document_url = env_var("KINDRED_DOCUMENT_URL")?;
    let blob_url = env_var("KINDRED_BLOB_URL")?;

    let mut config = Config::default();
    config.backend.document_base_url = Some(document_url);
    config.backend.blob_base_url = Some(blob_url);

    if let Ok(collection) = std::env::var("KINDRED_COLLECTION") {
        config.backend.collection = collection;
    }

    if let Some(fraction) = env_parse::<f32>("KINDRED_SWIPE_THRESHOLD_FRACTION")? {
        config.swipe.threshold = SwipeThreshold::Fraction(fraction);
    }
    if let Some(px) = env_parse::<f32>("KINDRED_SWIPE_THRESHOLD_PX")? {
        config.swipe.threshold = SwipeThreshold::Fixed(px);
    }

    if let Some(secs) = env_parse::<u64>("KINDRED_UPLOAD_TIMEOUT_SECS")? {
        config.autosave.upload_timeout_secs = secs;
    }
    if let Ok(policy) = std::env::var("KINDRED_MERGE_POLICY") {
        config.autosave.merge_policy = parse_merge_policy(&policy)?;
    }

    if let Ok(level) = std::env::var("KINDRED_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("KINDRED_LOG_JSON", config.logging.json);

    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations. JSON and TOML are
/// detected by extension.
///
/// # Errors
/// `KindredError::Config` if the file is missing, unreadable or malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(KindredError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            KindredError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| KindredError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| KindredError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| KindredError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(KindredError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| SEARCH_DIRS.iter().map(move |dir| root.join(dir)))
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn parse_merge_policy(raw: &str) -> std::result::Result<MergePolicy, MissingOrInvalid> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "newest_edit" => Ok(MergePolicy::NewestEdit),
        "last_applied" => Ok(MergePolicy::LastApplied),
        other => Err(MissingOrInvalid::Invalid(KindredError::Config(format!(
            "Invalid merge policy '{other}' (expected newest_edit or last_applied)"
        )))),
    }
}

fn env_var(key: &'static str) -> std::result::Result<String, MissingOrInvalid> {
    std::env::var(key).map_err(|_| MissingOrInvalid::Missing(key))
}

/// Optional variable parsed as `T`; unset is `None`, unparseable is an error.
fn env_parse<T>(key: &str) -> std::result::Result<Option<T>, MissingOrInvalid>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            MissingOrInvalid::Invalid(KindredError::Config(format!("Invalid {key}: {e}")))
        }),
        Err(_) => Ok(None),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use tempfile::Builder;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: &[&str] = &[
        "KINDRED_DOCUMENT_URL",
        "KINDRED_BLOB_URL",
        "KINDRED_COLLECTION",
        "KINDRED_SWIPE_THRESHOLD_FRACTION",
        "KINDRED_SWIPE_THRESHOLD_PX",
        "KINDRED_UPLOAD_TIMEOUT_SECS",
        "KINDRED_MERGE_POLICY",
        "KINDRED_LOG_LEVEL",
        "KINDRED_LOG_JSON",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn temp_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        for (key, value) in [("KB_T1", "1"), ("KB_T2", "TRUE"), ("KB_T3", "yes"), ("KB_T4", "on")] {
            std::env::set_var(key, value);
            assert!(env_bool(key, false), "{value} should be true");
            std::env::remove_var(key);
        }
        for (key, value) in [("KB_F1", "0"), ("KB_F2", "false"), ("KB_F3", "no"), ("KB_F4", "off")] {
            std::env::set_var(key, value);
            assert!(!env_bool(key, true), "{value} should be false");
            std::env::remove_var(key);
        }

        assert!(env_bool("KB_MISSING", true));
        assert!(!env_bool("KB_MISSING", false));
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        std::env::set_var("KINDRED_DOCUMENT_URL", "https://docs.test/v1");
        std::env::set_var("KINDRED_BLOB_URL", "https://blobs.test");
        std::env::set_var("KINDRED_COLLECTION", "people");
        std::env::set_var("KINDRED_SWIPE_THRESHOLD_FRACTION", "0.3");
        std::env::set_var("KINDRED_UPLOAD_TIMEOUT_SECS", "45");
        std::env::set_var("KINDRED_MERGE_POLICY", "last-applied");
        std::env::set_var("KINDRED_LOG_LEVEL", "debug");
        std::env::set_var("KINDRED_LOG_JSON", "true");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.backend.document_base_url.as_deref(), Some("https://docs.test/v1"));
        assert_eq!(config.backend.blob_base_url.as_deref(), Some("https://blobs.test"));
        assert_eq!(config.backend.collection, "people");
        assert_eq!(config.swipe.threshold, SwipeThreshold::Fraction(0.3));
        assert_eq!(config.autosave.upload_timeout_secs, 45);
        assert_eq!(config.autosave.merge_policy, MergePolicy::LastApplied);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);

        clear_env();
    }

    #[test]
    fn test_fixed_threshold_wins_over_fraction() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        std::env::set_var("KINDRED_DOCUMENT_URL", "https://docs.test");
        std::env::set_var("KINDRED_BLOB_URL", "https://blobs.test");
        std::env::set_var("KINDRED_SWIPE_THRESHOLD_FRACTION", "0.3");
        std::env::set_var("KINDRED_SWIPE_THRESHOLD_PX", "120");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.swipe.threshold, SwipeThreshold::Fixed(120.0));

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        std::env::set_var("KINDRED_DOCUMENT_URL", "https://docs.test");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, MissingOrInvalid::Missing("KINDRED_BLOB_URL")));
        assert!(matches!(KindredError::from(err), KindredError::Config(_)));

        clear_env();
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        std::env::set_var("KINDRED_DOCUMENT_URL", "https://docs.test");
        std::env::set_var("KINDRED_BLOB_URL", "https://blobs.test");

        std::env::set_var("KINDRED_UPLOAD_TIMEOUT_SECS", "soon");
        assert!(matches!(load_from_env(), Err(MissingOrInvalid::Invalid(KindredError::Config(_)))));
        std::env::remove_var("KINDRED_UPLOAD_TIMEOUT_SECS");

        std::env::set_var("KINDRED_MERGE_POLICY", "whatever");
        assert!(matches!(load_from_env(), Err(MissingOrInvalid::Invalid(_))));
        assert!(load().is_err(), "invalid env must not fall back to a file");

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let file = temp_config(
            ".json",
            r#"{
                "swipe": { "threshold": { "kind": "fixed", "value": 120.0 } },
                "autosave": { "upload_timeout_secs": 10 },
                "backend": { "document_base_url": "http://localhost:8080" }
            }"#,
        );

        let config = load_from_file(Some(file.path().to_path_buf())).expect("json config");
        assert_eq!(config.swipe.threshold, SwipeThreshold::Fixed(120.0));
        assert_eq!(config.autosave.upload_timeout_secs, 10);
        assert_eq!(config.backend.document_base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.backend.blob_base_url, None);
    }

    #[test]
    fn test_load_from_file_toml() {
        let file = temp_config(
            ".toml",
            r#"
[autosave]
merge_policy = "last_applied"

[logging]
level = "kindred_core=debug"
json = true
"#,
        );

        let config = load_from_file(Some(file.path().to_path_buf())).expect("toml config");
        assert_eq!(config.autosave.merge_policy, MergePolicy::LastApplied);
        assert_eq!(config.logging.level, "kindred_core=debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/kindred.json")));
        assert!(matches!(result, Err(KindredError::Config(_))));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let file = temp_config(".json", r#"{ "swipe": "#);
        let result = load_from_file(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(KindredError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("level: info", &PathBuf::from("kindred.yaml"));
        assert!(matches!(result, Err(KindredError::Config(msg)) if msg.contains("yaml")));
    }

    #[test]
    fn test_parse_merge_policy_accepts_variants() {
        assert!(matches!(parse_merge_policy("NEWEST_EDIT"), Ok(MergePolicy::NewestEdit)));
        assert!(matches!(parse_merge_policy(" last-applied "), Ok(MergePolicy::LastApplied)));
    }
}
