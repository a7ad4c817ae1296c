//! Configuration management for HoneyChow.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Command-line flags are applied on top by
//! the binary.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default remote location of the site database.
pub const DEFAULT_DATABASE_SOURCE: &str =
    "https://raw.githubusercontent.com/libreosint/honeychow/refs/heads/master/data/honeychow-sites.json";

/// Main application configuration.
///
/// This is loaded from `~/.config/honeychow/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Probe dispatch settings
    pub search: SearchConfig,
    /// Site database location
    pub database: DatabaseConfig,
    /// Result display settings
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `HONEYCHOW_WORKERS`: Override the concurrency ceiling
    /// - `HONEYCHOW_TIMEOUT_SECS`: Override the per-request timeout
    /// - `HONEYCHOW_DATABASE`: Load sites from a local JSON file instead of remote
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("HONEYCHOW_WORKERS") {
            if let Ok(workers) = val.parse() {
                self.search.workers = workers;
                tracing::debug!("Override search.workers from env: {}", workers);
            }
        }

        if let Some(val) = lookup("HONEYCHOW_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.search.timeout_secs = secs;
                tracing::debug!("Override search.timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup("HONEYCHOW_DATABASE") {
            if !val.is_empty() {
                tracing::debug!("Override database.path from env: {}", val);
                self.database.path = Some(PathBuf::from(val));
            }
        }
    }

    /// Check that numeric settings are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.search.workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.workers".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.search.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/honeychow/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("org", "libreosint", "honeychow").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Probe dispatch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of probes awaiting the network at once
    pub workers: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Baseline `User-Agent` header
    pub user_agent: String,
    /// Baseline `Accept` header
    pub accept: String,
    /// Baseline `Accept-Language` header
    pub accept_language: String,
}

impl SearchConfig {
    /// Baseline headers sent with every probe before site overrides.
    #[must_use]
    pub fn default_headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Accept".to_string(), self.accept.clone()),
            ("Accept-Language".to_string(), self.accept_language.clone()),
        ])
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: 100,
            timeout_secs: 15,
            user_agent:
                "Mozilla/5.0 (X11; Linux x86_64; rv:147.0) Gecko/20100101 Firefox/147.0"
                    .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
    }
}

/// Site database location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Remote sources, tried in order until one succeeds
    pub sources: Vec<String>,
    /// Local JSON file; takes precedence over the remote sources when set
    pub path: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sources: vec![DEFAULT_DATABASE_SOURCE.to_string()],
            path: None,
        }
    }
}

/// Result display settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Show sites where the username was not found
    pub show_not_found: bool,
    /// Show sites whose probe failed
    pub show_failed: bool,
}
