// SPDX-License-Identifier: Apache-2.0

//! GitHub API rate limit checking.
//!
//! Used to learn when the core rate limit window resets after GitHub
//! rejected a request for exceeding it.

use chrono::{DateTime, Utc};
use tracing::debug;

/// GitHub API rate limit status.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Number of API calls remaining in the current rate limit window.
    pub remaining: u32,
    /// Total number of API calls allowed in the rate limit window.
    pub limit: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset_at: u64,
}

impl RateLimitStatus {
    /// Returns true if the window is exhausted.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Reset time as a UTC timestamp.
    #[must_use]
    pub fn reset_time(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.reset_at)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Returns a human-readable status message.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "GitHub API: {}/{} calls remaining",
            self.remaining, self.limit
        )
    }
}

/// Checks the GitHub API rate limit status.
///
/// `GET /rate_limit` does not count against the limit, so this is safe to
/// call after a rate limit rejection.
///
/// # Errors
///
/// Returns the octocrab error if the request fails.
pub async fn check_rate_limit(
    client: &octocrab::Octocrab,
) -> std::result::Result<RateLimitStatus, octocrab::Error> {
    debug!("Checking GitHub API rate limit");

    let rate_limit = client.ratelimit().get().await?;

    #[allow(clippy::cast_possible_truncation)]
    let status = RateLimitStatus {
        remaining: rate_limit.resources.core.remaining as u32,
        limit: rate_limit.resources.core.limit as u32,
        reset_at: rate_limit.resources.core.reset,
    };

    debug!(
        remaining = status.remaining,
        limit = status.limit,
        reset_at = status.reset_at,
        "GitHub rate limit status"
    );

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted() {
        let status = RateLimitStatus {
            remaining: 0,
            limit: 5000,
            reset_at: 1_700_000_000,
        };
        assert!(status.is_exhausted());
    }

    #[test]
    fn test_not_exhausted() {
        let status = RateLimitStatus {
            remaining: 1,
            limit: 5000,
            reset_at: 1_700_000_000,
        };
        assert!(!status.is_exhausted());
    }

    #[test]
    fn test_reset_time() {
        let status = RateLimitStatus {
            remaining: 0,
            limit: 60,
            reset_at: 1_700_000_000,
        };
        assert_eq!(
            status.reset_time(),
            DateTime::from_timestamp(1_700_000_000, 0)
        );
    }

    #[test]
    fn test_rate_limit_status_message() {
        let status = RateLimitStatus {
            remaining: 42,
            limit: 5000,
            reset_at: 1_234_567_890,
        };
        assert_eq!(status.message(), "GitHub API: 42/5000 calls remaining");
    }
}
