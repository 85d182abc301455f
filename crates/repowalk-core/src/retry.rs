// SPDX-License-Identifier: Apache-2.0

//! Retry logic with exponential backoff for transient failures.
//!
//! Provides the bounded retry policy handed to the API client, the HTTP
//! status classification it relies on, and the rate limit wait decision.

use std::time::Duration;

use backon::ExponentialBuilder;
use bon::Builder;
use chrono::{DateTime, Utc};

/// Bounded retry policy for transient API failures.
///
/// `max_attempts` counts the first request, so a policy of 3 issues at most
/// two retries. Delays grow by a factor of 2 from `min_delay`, capped at
/// `max_delay`.
#[derive(Debug, Clone, Builder)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Values below 1 are treated as 1.
    #[builder(default = 3)]
    pub max_attempts: u32,
    /// Delay before the first retry.
    #[builder(default = Duration::from_secs(1))]
    pub min_delay: Duration,
    /// Upper bound for a single delay.
    #[builder(default = Duration::from_secs(8))]
    pub max_delay: Duration,
    /// Randomise delays to avoid synchronised retries.
    #[builder(default = true)]
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    /// Total attempts, never less than one.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Creates the exponential backoff builder for this policy.
    #[must_use]
    pub fn backoff(&self) -> ExponentialBuilder {
        let builder = ExponentialBuilder::default()
            .with_factor(2.0)
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times((self.attempts() - 1) as usize);
        if self.jitter {
            builder.with_jitter()
        } else {
            builder
        }
    }
}

/// Determines if an HTTP status code is a transient server-side failure.
///
/// Retryable status codes are 500, 502, 503 and 504. Rate limit responses
/// (403/429) are handled separately because they carry a reset time.
#[must_use]
pub fn is_retryable_http(status: u16) -> bool {
    matches!(status, 500 | 502 | 503 | 504)
}

/// Decides how long to sleep for a rate limit reset.
///
/// Returns `None` when the reset time is unknown or further away than
/// `max_wait`; the caller should then fail with `RateLimited`. A reset that
/// already passed still waits one second so the window has turned over.
#[must_use]
pub fn rate_limit_wait(
    reset_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    max_wait: Duration,
) -> Option<Duration> {
    if max_wait.is_zero() {
        return None;
    }
    let reset_at = reset_at?;
    let remaining = (reset_at - now).to_std().unwrap_or(Duration::ZERO);
    let wait = remaining + Duration::from_secs(1);
    (wait <= max_wait).then_some(wait)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable_http_server_errors() {
        assert!(is_retryable_http(500));
        assert!(is_retryable_http(502));
        assert!(is_retryable_http(503));
        assert!(is_retryable_http(504));
    }

    #[test]
    fn test_is_retryable_http_non_retryable() {
        assert!(!is_retryable_http(400));
        assert!(!is_retryable_http(401));
        assert!(!is_retryable_http(403));
        assert!(!is_retryable_http(404));
        assert!(!is_retryable_http(429));
        assert!(!is_retryable_http(200));
    }

    #[test]
    fn test_policy_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.min_delay, Duration::from_secs(1));
        assert!(policy.jitter);
    }

    #[test]
    fn test_attempts_never_below_one() {
        let policy = RetryPolicy::builder().max_attempts(0).build();
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn test_backoff_configuration() {
        let backoff = RetryPolicy::default().backoff();
        // Verify it's an ExponentialBuilder (type check at compile time)
        let _: ExponentialBuilder = backoff;
    }

    #[test]
    fn test_rate_limit_wait_within_budget() {
        let now = Utc::now();
        let reset = now + chrono::Duration::seconds(10);
        let wait = rate_limit_wait(Some(reset), now, Duration::from_secs(60));
        assert_eq!(wait, Some(Duration::from_secs(11)));
    }

    #[test]
    fn test_rate_limit_wait_beyond_budget() {
        let now = Utc::now();
        let reset = now + chrono::Duration::minutes(30);
        assert_eq!(
            rate_limit_wait(Some(reset), now, Duration::from_secs(60)),
            None
        );
    }

    #[test]
    fn test_rate_limit_wait_unknown_reset() {
        assert_eq!(
            rate_limit_wait(None, Utc::now(), Duration::from_secs(60)),
            None
        );
    }

    #[test]
    fn test_rate_limit_wait_disabled() {
        let now = Utc::now();
        let reset = now + chrono::Duration::seconds(1);
        assert_eq!(rate_limit_wait(Some(reset), now, Duration::ZERO), None);
    }

    #[test]
    fn test_rate_limit_wait_reset_in_past() {
        let now = Utc::now();
        let reset = now - chrono::Duration::seconds(5);
        assert_eq!(
            rate_limit_wait(Some(reset), now, Duration::from_secs(60)),
            Some(Duration::from_secs(1))
        );
    }
}
