// SPDX-License-Identifier: Apache-2.0

//! Token provider abstraction.
//!
//! The core only consumes an opaque credential; where it comes from (process
//! environment, config file, GitHub CLI, a test fixture) is decided by the
//! front end implementing [`TokenProvider`].

use secrecy::SecretString;

use crate::github::auth::TokenSource;

/// Provides the GitHub credential for API calls.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token.
    ///
    /// Returns `None` if no token is available from any source.
    fn github_token(&self) -> Option<SecretString>;

    /// Where the token returned by [`Self::github_token`] came from, if known.
    fn token_source(&self) -> Option<TokenSource> {
        None
    }
}

/// A provider that always hands out the same token.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: Option<SecretString>,
}

impl StaticTokenProvider {
    /// Wraps a fixed token, or none at all.
    #[must_use]
    pub fn new(token: Option<SecretString>) -> Self {
        Self { token }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_static_provider_with_token() {
        let provider = StaticTokenProvider::new(Some(SecretString::from("gh_token")));
        assert_eq!(
            provider.github_token().unwrap().expose_secret(),
            "gh_token"
        );
        assert!(provider.token_source().is_none());
    }

    #[test]
    fn test_static_provider_without_token() {
        let provider = StaticTokenProvider::new(None);
        assert!(provider.github_token().is_none());
    }
}
