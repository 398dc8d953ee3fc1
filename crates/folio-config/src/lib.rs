//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `backend.base_url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override backend base URL.
    pub base_url: Option<String>,
    /// Override request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override whether the page-size preference is persisted.
    pub preferences_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Default number of comments requested when no preference is stored.
///
/// Matches the backend's own fallback for a missing `comment-amount`.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound for `feed.default_page_size`.
const MAX_PAGE_SIZE: u32 = 1000;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection configuration.
    pub backend: BackendConfig,
    /// Comment feed configuration.
    pub feed: FeedConfig,
    /// Preference store configuration (paths are relative strings from TOML).
    preferences: PreferencesConfigRaw,

    /// Resolved preference store configuration (set after loading).
    #[serde(skip)]
    pub preferences_resolved: PreferencesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Backend connection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the portfolio backend serving `/data` and `/auth`.
    pub base_url: String,
    /// HTTP timeout in seconds for every request.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Comment feed configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Page size used when no preference has been stored yet.
    pub default_page_size: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PreferencesConfigRaw {
    dir: Option<String>,
    enabled: Option<bool>,
}

/// Resolved preference store configuration with absolute paths.
#[derive(Debug, Default)]
pub struct PreferencesConfig {
    /// Directory holding `preferences.json`.
    pub dir: PathBuf,
    /// Whether preferences are persisted at all.
    pub enabled: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`backend.base_url`").
        field: String,
        /// Error message (e.g., "${`FOLIO_BACKEND`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and validated together with the
    /// file values, so an invalid `--base-url` is reported the same way as an
    /// invalid config entry.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.backend.base_url.clone_from(base_url);
        }
        if let Some(timeout) = settings.timeout_secs {
            self.backend.timeout_secs = timeout;
        }
        if let Some(enabled) = settings.preferences_enabled {
            self.preferences_resolved.enabled = enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            backend: BackendConfig::default(),
            feed: FeedConfig::default(),
            preferences: PreferencesConfigRaw::default(),
            preferences_resolved: PreferencesConfig {
                dir: base.join(".folio"),
                enabled: true,
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.backend.base_url, "backend.base_url")?;
        require_http_url(&self.backend.base_url, "backend.base_url")?;

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "backend.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        if self.feed.default_page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "feed.default_page_size cannot exceed {MAX_PAGE_SIZE}"
            )));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.backend.base_url = expand::expand_env(&self.backend.base_url, "backend.base_url")?;
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        self.preferences_resolved = PreferencesConfig {
            dir: config_dir.join(self.preferences.dir.as_deref().unwrap_or(".folio")),
            enabled: self.preferences.enabled.unwrap_or(true),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.feed.default_page_size, 10);
        assert_eq!(config.preferences_resolved.dir, PathBuf::from("/test/.folio"));
        assert!(config.preferences_resolved.enabled);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(config.feed.default_page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[backend]
base_url = "https://portfolio.example.com"
timeout_secs = 5

[feed]
default_page_size = 25

[preferences]
dir = "state"
enabled = false
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.backend.base_url, "https://portfolio.example.com");
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.feed.default_page_size, 25);
        assert_eq!(config.preferences_resolved.dir, PathBuf::from("/project/state"));
        assert!(!config.preferences_resolved.enabled);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("folio.toml");
        std::fs::write(&path, "[feed]\ndefault_page_size = 3\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.feed.default_page_size, 3);
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.preferences_resolved.dir, tmp.path().join(".folio"));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/folio.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("folio.toml");
        std::fs::write(&path, "[backend\nbase_url = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings {
            base_url: Some("https://other.example.com".to_owned()),
            timeout_secs: Some(2),
            preferences_enabled: Some(false),
        });

        assert_eq!(config.backend.base_url, "https://other.example.com");
        assert_eq!(config.backend.timeout_secs, 2);
        assert!(!config.preferences_resolved.enabled);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.preferences_resolved.enabled);
    }

    #[test]
    fn test_cli_base_url_is_validated() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("folio.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            base_url: Some("ftp://example.com".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();

        assert!(err.to_string().contains("backend.base_url"));
    }

    #[test]
    fn test_expand_env_vars_base_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_BACKEND", "https://env.example.com");
        }

        let toml = r#"
[backend]
base_url = "${FOLIO_TEST_BACKEND}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.backend.base_url, "https://env.example.com");

        unsafe {
            std::env::remove_var("FOLIO_TEST_BACKEND");
        }
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_validate_empty_base_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.backend.base_url = String::new();
        assert_validation_error(&config, &["backend.base_url", "cannot be empty"]);
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.backend.base_url = "localhost:8080".to_owned();
        assert_validation_error(&config, &["backend.base_url", "http://"]);
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.backend.timeout_secs = 0;
        assert_validation_error(&config, &["backend.timeout_secs"]);
    }

    #[test]
    fn test_validate_page_size_limit() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.feed.default_page_size = 5000;
        assert_validation_error(&config, &["feed.default_page_size", "1000"]);

        config.feed.default_page_size = 0;
        assert!(config.validate().is_ok());
    }
}
