//! Application configuration for Quill.
//!
//! Values are resolved in increasing priority: built-in defaults, the JSON
//! file at `~/.config/quill/config.json` (or `QUILL_CONFIG_PATH`), then the
//! environment. Command-line flags are applied on top by the binary.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use quill_types::{DEFAULT_BLUR_DELAY, InputKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::path_processing::config_path;

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "QUILL_CONFIG_PATH";

/// Environment variable carrying the base URL of the suggestion service.
pub const API_URL_ENV: &str = "API_URL";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Hostnames allowed to use plain http.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Error surfaced when reading or validating configuration fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure (for example, permissions).
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The base URL could not be parsed or is not allowed.
    #[error("invalid API_URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Resolved configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the suggestion service; suggestions are not fetched when unset.
    pub api_url: Option<String>,
    /// Whether the suggestion overlay is enabled.
    pub auto_complete: bool,
    /// Hint rendered while the field is empty.
    pub placeholder: String,
    /// Semantic kind of the tag input field.
    pub input_kind: InputKind,
    /// Debounce between blur and the field losing focus.
    pub blur_delay_ms: u64,
    /// Maximum number of suggestion rows shown at once.
    pub max_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            auto_complete: true,
            placeholder: String::new(),
            input_kind: InputKind::Text,
            blur_delay_ms: DEFAULT_BLUR_DELAY.as_millis() as u64,
            max_rows: 8,
        }
    }
}

impl AppConfig {
    /// Load from the default path and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_config_path();
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from `path`. A missing file yields defaults; a malformed file is
    /// logged and also yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded config file");
                    Ok(config)
                }
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "Failed to parse config file; using defaults"
                    );
                    Ok(Self::default())
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(ConfigError::Io(error)),
        }
    }

    /// Apply `API_URL` when it is set and non-blank.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                self.api_url = Some(trimmed.to_string());
            }
        }
    }

    pub fn blur_delay(&self) -> Duration {
        Duration::from_millis(self.blur_delay_ms)
    }

    /// The validated suggestion service base, or `None` when not configured.
    pub fn api_base(&self) -> Result<Option<Url>, ConfigError> {
        self.api_url.as_deref().map(validate_base_url).transpose()
    }
}

/// Path of the JSON config file.
pub fn default_config_path() -> PathBuf {
    config_path(CONFIG_PATH_ENV, CONFIG_FILE_NAME)
}

/// Validate and normalise a suggestion service base URL.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
///
/// The returned URL always ends with `/` so endpoint names can be joined.
pub fn validate_base_url(base: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: base.to_string(),
        reason,
    };
    let mut parsed = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| invalid("must include a host".into()))?;

    let is_local = LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host.eq_ignore_ascii_case(allowed));
    if !is_local && parsed.scheme() != "https" {
        return Err(invalid(format!(
            "must use https for non-localhost hosts; got '{}://'",
            parsed.scheme()
        )));
    }

    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load_from(&dir.path().join("absent.json")).expect("load");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.blur_delay(), Duration::from_millis(200));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"auto_complete": false, "input_kind": "search"}"#).expect("write");

        let config = AppConfig::load_from(&path).expect("load");
        assert!(!config.auto_complete);
        assert_eq!(config.input_kind, InputKind::Search);
        assert_eq!(config.max_rows, 8);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").expect("write");
        assert_eq!(AppConfig::load_from(&path).expect("load"), AppConfig::default());
    }

    #[test]
    fn env_overrides_api_url() {
        temp_env::with_var(API_URL_ENV, Some("http://localhost:3000/api/"), || {
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            assert_eq!(config.api_url.as_deref(), Some("http://localhost:3000/api/"));
        });
        temp_env::with_var(API_URL_ENV, Some("  "), || {
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            assert!(config.api_url.is_none());
        });
    }

    #[test]
    fn base_url_rules() {
        let local = validate_base_url("http://localhost:3000/api").expect("local http allowed");
        assert_eq!(local.as_str(), "http://localhost:3000/api/");

        let remote = validate_base_url("https://journal.example.com/").expect("https allowed");
        assert_eq!(remote.join("actionSuggestion").expect("join").as_str(), "https://journal.example.com/actionSuggestion");

        assert!(matches!(
            validate_base_url("http://journal.example.com"),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
        assert!(validate_base_url("not a url").is_err());
    }
}
