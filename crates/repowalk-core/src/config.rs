// SPDX-License-Identifier: Apache-2.0

//! Configuration management for repowalk.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `REPOWALK_`)
//! 2. Config file: `~/.config/repowalk/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Wait up to five minutes for a rate limit reset
//! REPOWALK_GITHUB__MAX_RATE_LIMIT_WAIT_SECONDS=300 repowalk --all
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::error::RepowalkError;
use crate::retry::RetryPolicy;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Retry policy for transient API failures.
    pub retry: RetryConfig,
    /// UI preferences.
    pub ui: UiConfig,
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Access token, used when no `GH_TOKEN`/`GITHUB_TOKEN` is set.
    #[serde(deserialize_with = "deserialize_secret")]
    pub token: Option<SecretString>,
    /// REST API base URL.
    pub api_url: String,
    /// Per-attempt request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// Page size for list endpoints (GitHub caps it at 100).
    pub per_page: u8,
    /// Longest rate limit reset we are willing to sleep through. 0 never waits.
    pub max_rate_limit_wait_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: "https://api.github.com".to_string(),
            api_timeout_seconds: 10,
            per_page: 100,
            max_rate_limit_wait_seconds: 60,
        }
    }
}

impl GitHubConfig {
    /// Page size clamped to the range GitHub accepts.
    #[must_use]
    pub fn page_size(&self) -> u8 {
        self.per_page.clamp(1, 100)
    }

    /// Per-attempt request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds.max(1))
    }

    /// Maximum time to wait for a rate limit reset.
    #[must_use]
    pub fn max_rate_limit_wait(&self) -> Duration {
        Duration::from_secs(self.max_rate_limit_wait_seconds)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token.filter(|t| !t.is_empty()).map(SecretString::from))
}

/// Retry settings for transient failures.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per request, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds.
    pub min_delay_ms: u64,
    /// Upper bound for a single backoff delay in milliseconds.
    pub max_delay_ms: u64,
    /// Randomise delays.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_delay_ms: 1000,
            max_delay_ms: 8000,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Builds the retry policy handed to the API client.
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::builder()
            .max_attempts(self.max_attempts)
            .min_delay(Duration::from_millis(self.min_delay_ms))
            .max_delay(Duration::from_millis(self.max_delay_ms))
            .jitter(self.jitter)
            .build()
    }
}

/// UI preferences.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable colored output.
    pub color: bool,
    /// Show a spinner while fetching.
    pub progress: bool,
    /// Age in days from which timestamps are shown as dates instead of "N days ago".
    pub relative_time_days: i64,
    /// Width of the language distribution bar at 100%.
    pub bar_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
            relative_time_days: 30,
            bar_width: 50,
        }
    }
}

/// Returns the repowalk configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/repowalk`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("repowalk");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("repowalk")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration from the default location.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `REPOWALK_` and double underscore
/// for nested keys (e.g., `REPOWALK_UI__BAR_WIDTH`).
///
/// # Errors
///
/// Returns `RepowalkError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, RepowalkError> {
    load_config_from(&config_file_path())
}

/// Load application configuration using an explicit config file path.
///
/// # Errors
///
/// Returns `RepowalkError::Config` if the file exists but is invalid.
pub fn load_config_from(path: &Path) -> Result<AppConfig, RepowalkError> {
    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::from(path).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("REPOWALK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
