// SPDX-License-Identifier: Apache-2.0

//! GitHub token resolution and client construction.
//!
//! Tokens are resolved through a priority chain:
//! 1. Environment variable (`GH_TOKEN` or `GITHUB_TOKEN`)
//! 2. `github.token` from the repowalk configuration
//! 3. GitHub CLI (`gh auth token`)

use std::process::Command;

use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::config::GitHubConfig;
use crate::error::RepowalkError;

/// Source of the GitHub authentication token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// Token from `GH_TOKEN` or `GITHUB_TOKEN` environment variable.
    Environment,
    /// Token from the repowalk config file or `REPOWALK_GITHUB__TOKEN`.
    ConfigFile,
    /// Token from `gh auth token` command.
    GhCli,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Environment => write!(f, "environment variable"),
            TokenSource::ConfigFile => write!(f, "config file"),
            TokenSource::GhCli => write!(f, "GitHub CLI"),
        }
    }
}

/// Attempts to get a token from the GitHub CLI (`gh auth token`).
///
/// Returns `None` if `gh` is not installed, not authenticated, or fails.
#[instrument]
fn get_token_from_gh_cli() -> Option<SecretString> {
    debug!("Attempting to get token from gh CLI");

    match Command::new("gh").args(["auth", "token"]).output() {
        Ok(output) if output.status.success() => {
            let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if token.is_empty() {
                debug!("gh auth token returned empty output");
                None
            } else {
                debug!("Successfully retrieved token from gh CLI");
                Some(SecretString::from(token))
            }
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                status = ?output.status,
                stderr = %stderr.trim(),
                "gh auth token failed"
            );
            None
        }
        Err(e) => {
            debug!(error = %e, "Failed to execute gh command");
            None
        }
    }
}

/// Resolves a GitHub token using the priority chain.
///
/// Returns the token and its source, or `None` if no token is found.
#[instrument(skip(config))]
pub fn resolve_token(config: &GitHubConfig) -> Option<(SecretString, TokenSource)> {
    resolve_from(
        |key| std::env::var(key).ok(),
        config.token.as_ref(),
        get_token_from_gh_cli,
    )
}

fn resolve_from(
    env: impl Fn(&str) -> Option<String>,
    configured: Option<&SecretString>,
    gh_cli: impl FnOnce() -> Option<SecretString>,
) -> Option<(SecretString, TokenSource)> {
    for key in ["GH_TOKEN", "GITHUB_TOKEN"] {
        if let Some(token) = env(key).filter(|t| !t.is_empty()) {
            debug!(variable = key, "Using token from environment variable");
            return Some((SecretString::from(token), TokenSource::Environment));
        }
    }

    if let Some(token) = configured.filter(|t| !t.expose_secret().is_empty()) {
        debug!("Using token from configuration");
        return Some((token.clone(), TokenSource::ConfigFile));
    }

    if let Some(token) = gh_cli() {
        debug!("Using token from GitHub CLI");
        return Some((token, TokenSource::GhCli));
    }

    debug!("No token found in any source");
    None
}

/// Creates an authenticated Octocrab client using a provided token.
///
/// Applies the configured base URL and per-attempt timeouts. Retries are
/// not delegated to octocrab; [`super::GitHubClient`] owns them.
///
/// # Errors
///
/// Returns `RepowalkError::Config` if the base URL is invalid or the client
/// cannot be built.
#[instrument(skip(token, config), fields(api_url = %config.api_url))]
pub fn create_client_with_token(token: &SecretString, config: &GitHubConfig) -> Result<Octocrab> {
    info!("Creating GitHub client");

    let client = Octocrab::builder()
        .base_uri(config.api_url.as_str())
        .map_err(|e| RepowalkError::config(format!("invalid github.api_url: {e}")))?
        .personal_token(token.expose_secret().to_string())
        .set_connect_timeout(Some(config.timeout()))
        .set_read_timeout(Some(config.timeout()))
        .build()
        .map_err(|e| RepowalkError::config(format!("failed to build GitHub client: {e}")))?;

    debug!("Created authenticated GitHub client");
    Ok(client)
}
