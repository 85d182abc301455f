// SPDX-License-Identifier: Apache-2.0

//! Error types for repowalk.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Broad category of a [`RepowalkError`], used to pick exit codes and hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, invalid or expired credential.
    Auth,
    /// GitHub API rate limit exhausted.
    RateLimited,
    /// Network failure or 5xx that outlived the retry policy.
    Transient,
    /// Invalid flags, invalid config file, or a prompt that cannot be shown.
    Configuration,
    /// Pagination was interrupted and partial results were discarded.
    Aggregation,
    /// Anything else (export I/O, unexpected API responses).
    Other,
}

/// Errors that can occur during repowalk operations.
#[derive(Error, Debug)]
pub enum RepowalkError {
    /// No credential could be resolved from any source.
    #[error(
        "Authentication required - set GH_TOKEN or GITHUB_TOKEN, or log in with `gh auth login`"
    )]
    NotAuthenticated,

    /// GitHub rejected the credential (401).
    #[error("GitHub rejected the access token: {message}")]
    Auth {
        /// Error message returned by GitHub.
        message: String,
    },

    /// GitHub API rate limit exceeded.
    #[error("GitHub API rate limit exceeded{}", reset_suffix(.reset_at))]
    RateLimited {
        /// When the rate limit window resets, if GitHub reported it.
        reset_at: Option<DateTime<Utc>>,
    },

    /// Network error or server-side failure.
    #[error("GitHub API unavailable after {attempts} attempt(s): {message}")]
    Transient {
        /// Description of the last failure.
        message: String,
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// Non-retryable GitHub API failure (unknown organization, bad response).
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Error message.
        message: String,
        /// HTTP status code, when the failure came from an HTTP response.
        status: Option<u16>,
    },

    /// Invalid configuration, flag combination, or unavailable prompt.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Pagination over a scope stopped before the last page.
    #[error(
        "Listing {scope} failed on page {page}; discarded {discarded} partially collected repositories"
    )]
    Aggregation {
        /// Human-readable scope description.
        scope: String,
        /// Page number that failed (1-based).
        page: u32,
        /// Number of records collected before the failure.
        discarded: usize,
        /// The underlying API failure.
        #[source]
        source: Box<RepowalkError>,
    },

    /// Writing or reading the JSON export failed.
    #[error("Failed to access export file {}", .path.display())]
    Export {
        /// Export file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The export file did not contain a valid record array.
    #[error("Invalid export file {}", .path.display())]
    InvalidExport {
        /// Export file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

#[allow(clippy::ref_option)]
fn reset_suffix(reset_at: &Option<DateTime<Utc>>) -> String {
    reset_at.as_ref().map_or_else(String::new, |at| {
        format!(", resets at {}", at.format("%Y-%m-%d %H:%M:%S UTC"))
    })
}

impl RepowalkError {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepowalkError::NotAuthenticated | RepowalkError::Auth { .. } => ErrorKind::Auth,
            RepowalkError::RateLimited { .. } => ErrorKind::RateLimited,
            RepowalkError::Transient { .. } => ErrorKind::Transient,
            RepowalkError::Config { .. } => ErrorKind::Configuration,
            RepowalkError::Aggregation { .. } => ErrorKind::Aggregation,
            RepowalkError::GitHub { .. }
            | RepowalkError::Export { .. }
            | RepowalkError::InvalidExport { .. } => ErrorKind::Other,
        }
    }

    /// Returns true if the failure should be retried with backoff.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, RepowalkError::Transient { .. })
    }

    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        RepowalkError::Config {
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for RepowalkError {
    fn from(err: config::ConfigError) -> Self {
        RepowalkError::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_message_includes_reset() {
        let reset_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let err = RepowalkError::RateLimited {
            reset_at: Some(reset_at),
        };
        assert_eq!(
            err.to_string(),
            "GitHub API rate limit exceeded, resets at 2023-11-14 22:13:20 UTC"
        );
    }

    #[test]
    fn rate_limited_message_without_reset() {
        let err = RepowalkError::RateLimited { reset_at: None };
        assert_eq!(err.to_string(), "GitHub API rate limit exceeded");
    }

    #[test]
    fn kinds() {
        assert_eq!(RepowalkError::NotAuthenticated.kind(), ErrorKind::Auth);
        assert_eq!(
            RepowalkError::config("bad flag").kind(),
            ErrorKind::Configuration
        );
        let agg = RepowalkError::Aggregation {
            scope: "organization acme".to_string(),
            page: 2,
            discarded: 100,
            source: Box::new(RepowalkError::GitHub {
                message: "Not Found".to_string(),
                status: Some(404),
            }),
        };
        assert_eq!(agg.kind(), ErrorKind::Aggregation);
        assert!(agg.to_string().contains("page 2"));
    }

    #[test]
    fn only_transient_is_retryable() {
        let transient = RepowalkError::Transient {
            message: "502 Bad Gateway".to_string(),
            attempts: 1,
        };
        assert!(transient.is_transient());
        assert!(!RepowalkError::RateLimited { reset_at: None }.is_transient());
        assert!(
            !RepowalkError::Auth {
                message: "Bad credentials".to_string()
            }
            .is_transient()
        );
    }
}
