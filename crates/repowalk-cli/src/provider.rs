// SPDX-License-Identifier: Apache-2.0

//! CLI-specific `TokenProvider` implementation.
//!
//! Resolves the GitHub token once from environment variables, the repowalk
//! config, or the GitHub CLI, and remembers where it came from.

use repowalk_core::auth::TokenProvider;
use repowalk_core::github::auth::{TokenSource, resolve_token};
use repowalk_core::GitHubConfig;
use secrecy::SecretString;
use tracing::debug;

/// CLI implementation of `TokenProvider`.
pub struct CliTokenProvider {
    resolved: Option<(SecretString, TokenSource)>,
}

impl CliTokenProvider {
    /// Resolves the token using the configured fallbacks.
    pub fn new(config: &GitHubConfig) -> Self {
        let resolved = resolve_token(config);
        match &resolved {
            Some((_, source)) => debug!(source = %source, "Resolved GitHub token"),
            None => debug!("No GitHub token found in CLI sources"),
        }
        Self { resolved }
    }
}

impl TokenProvider for CliTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        self.resolved.as_ref().map(|(token, _)| token.clone())
    }

    fn token_source(&self) -> Option<TokenSource> {
        self.resolved.as_ref().map(|(_, source)| *source)
    }
}
