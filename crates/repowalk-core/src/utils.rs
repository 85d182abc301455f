// SPDX-License-Identifier: Apache-2.0

//! Text utility functions for repowalk.
//!
//! Provides text formatting for truncation, repository sizes and relative
//! time display. Clock-dependent helpers take `now` explicitly.

use chrono::{DateTime, Utc};

/// Truncates text to a maximum length with a custom suffix.
///
/// Uses character count (not byte count) to safely handle multi-byte UTF-8.
/// The suffix is included in the max length calculation.
///
/// # Examples
///
/// ```
/// use repowalk_core::utils::truncate_with_suffix;
///
/// let text = "This is a very long string that needs truncation";
/// let result = truncate_with_suffix(text, 20, "... [more]");
/// assert!(result.ends_with("... [more]"));
/// assert!(result.chars().count() <= 20);
/// ```
#[must_use]
pub fn truncate_with_suffix(text: &str, max_len: usize, suffix: &str) -> String {
    let char_count = text.chars().count();
    if char_count <= max_len {
        text.to_string()
    } else {
        let suffix_len = suffix.chars().count();
        let truncate_at = max_len.saturating_sub(suffix_len);
        let truncated: String = text.chars().take(truncate_at).collect();
        format!("{truncated}{suffix}")
    }
}

/// Truncates text to a maximum length with default ellipsis suffix "...".
///
/// # Examples
///
/// ```
/// use repowalk_core::utils::truncate;
///
/// assert_eq!(truncate("Hello", 10), "Hello");
///
/// let long = "This is a very long description that exceeds the limit";
/// let result = truncate(long, 20);
/// assert!(result.ends_with("..."));
/// assert!(result.chars().count() <= 20);
/// ```
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    truncate_with_suffix(text, max_len, "...")
}

/// Formats a repository size given in kilobytes.
///
/// Below 1024 KB the value is shown in KB, otherwise in MB with one decimal.
///
/// # Examples
///
/// ```
/// use repowalk_core::utils::format_size;
///
/// assert_eq!(format_size(512), "512 KB");
/// assert_eq!(format_size(1536), "1.5 MB");
/// ```
#[must_use]
pub fn format_size(size_kb: u64) -> String {
    if size_kb < 1024 {
        format!("{size_kb} KB")
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mb = size_kb as f64 / 1024.0;
        format!("{mb:.1} MB")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Formats a timestamp relative to `now` (e.g., "3 days ago").
///
/// Deltas of `threshold_days` or more fall back to the absolute date
/// (`YYYY-MM-DD`). Timestamps in the future render as "just now".
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use repowalk_core::utils::format_relative_time;
///
/// let now = Utc::now();
/// assert_eq!(format_relative_time(&now, now, 30), "just now");
/// assert_eq!(format_relative_time(&(now - Duration::days(1)), now, 30), "1 day ago");
/// ```
#[must_use]
pub fn format_relative_time(dt: &DateTime<Utc>, now: DateTime<Utc>, threshold_days: i64) -> String {
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() >= threshold_days.max(1) {
        dt.format("%Y-%m-%d").to_string()
    } else if duration.num_days() > 0 {
        plural(duration.num_days(), "day")
    } else if duration.num_hours() > 0 {
        plural(duration.num_hours(), "hour")
    } else if duration.num_minutes() > 0 {
        plural(duration.num_minutes(), "minute")
    } else {
        "just now".to_string()
    }
}

/// Like [`format_relative_time`] for optional timestamps; missing ones read "unknown".
#[must_use]
pub fn format_optional_time(
    dt: Option<&DateTime<Utc>>,
    now: DateTime<Utc>,
    threshold_days: i64,
) -> String {
    dt.map_or_else(
        || "unknown".to_string(),
        |dt| format_relative_time(dt, now, threshold_days),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "日本語のテキストです";
        let result = truncate(text, 6);
        assert_eq!(result, "日本語...");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("exactly", 7), "exactly");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 KB");
        assert_eq!(format_size(1023), "1023 KB");
        assert_eq!(format_size(1024), "1.0 MB");
        assert_eq!(format_size(10 * 1024 + 512), "10.5 MB");
    }

    #[test]
    fn test_relative_time_units() {
        let now = now();
        assert_eq!(format_relative_time(&now, now, 30), "just now");
        assert_eq!(
            format_relative_time(&(now - Duration::seconds(59)), now, 30),
            "just now"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::minutes(1)), now, 30),
            "1 minute ago"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::minutes(45)), now, 30),
            "45 minutes ago"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::hours(3)), now, 30),
            "3 hours ago"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::days(2)), now, 30),
            "2 days ago"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::days(29)), now, 30),
            "29 days ago"
        );
    }

    #[test]
    fn test_relative_time_falls_back_to_date() {
        let now = now();
        assert_eq!(
            format_relative_time(&(now - Duration::days(30)), now, 30),
            "2025-05-16"
        );
        assert_eq!(
            format_relative_time(&(now - Duration::days(3)), now, 3),
            "2025-06-12"
        );
    }

    #[test]
    fn test_relative_time_future_is_just_now() {
        let now = now();
        assert_eq!(
            format_relative_time(&(now + Duration::days(3)), now, 30),
            "just now"
        );
    }

    #[test]
    fn test_relative_time_is_monotonic() {
        let now = now();
        let ages: Vec<i64> = (0..40).map(|d| d * 3600 * 13).collect();
        let rank = |s: &str| -> i64 {
            if s == "just now" {
                0
            } else if s.contains("minute") {
                1
            } else if s.contains("hour") {
                2
            } else if s.contains("day") {
                3
            } else {
                4
            }
        };
        let mut previous = 0;
        for age in ages {
            let label = format_relative_time(&(now - Duration::seconds(age)), now, 30);
            let current = rank(&label);
            assert!(current >= previous, "{label} after rank {previous}");
            previous = current;
        }
    }

    #[test]
    fn test_optional_time() {
        let now = now();
        assert_eq!(format_optional_time(None, now, 30), "unknown");
        assert_eq!(format_optional_time(Some(&now), now, 30), "just now");
    }
}
