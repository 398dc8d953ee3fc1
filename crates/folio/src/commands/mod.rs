//! CLI command implementations.

pub(crate) mod auth;
pub(crate) mod comments;

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use folio_client::FeedClient;
use folio_config::{CliSettings, Config};
use folio_prefs::{FilePreferences, MemoryPreferences, PreferenceStore};

use crate::error::CliError;

pub(crate) use comments::CommentsCommand;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config).
    #[arg(long, global = true, env = "FOLIO_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides config).
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Do not read or write the stored page size.
    #[arg(long, global = true)]
    no_preferences: bool,

    /// Enable verbose output (request logs).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load config with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
            preferences_enabled: self.no_preferences.then_some(false),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Backend client for the configured base URL and timeout.
pub(crate) fn client_from_config(config: &Config) -> FeedClient {
    FeedClient::with_timeout(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_secs),
    )
}

/// Preference store for the configured directory, or an in-memory one when
/// persistence is disabled.
pub(crate) fn preferences_from_config(config: &Config) -> Box<dyn PreferenceStore> {
    if config.preferences_resolved.enabled {
        Box::new(FilePreferences::new(&config.preferences_resolved.dir))
    } else {
        Box::new(MemoryPreferences::new())
    }
}
