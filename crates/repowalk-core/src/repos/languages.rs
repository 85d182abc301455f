// SPDX-License-Identifier: Apache-2.0

//! Language statistics over a ranked record set.

use std::collections::HashMap;

use serde::Serialize;

use super::RepositoryRecord;

/// How many leading languages the summary line reports on.
pub const TOP_LANGUAGES: usize = 5;

/// Share of one language among the records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    /// Language name, or the unspecified bucket.
    pub language: String,
    /// Number of repositories.
    pub count: usize,
    /// Share of all repositories, 0 to 100.
    pub percentage: f64,
}

/// Coarse size of a share, used to colour bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareLevel {
    /// More than half of all repositories.
    Dominant,
    /// More than a fifth.
    Significant,
    /// Everything else.
    Minor,
}

impl LanguageShare {
    /// Number of bar cells for a bar that is `width` cells wide at 100%.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn bar_len(&self, width: usize) -> usize {
        ((self.percentage * width as f64) / 100.0).floor() as usize
    }

    /// Classifies the share.
    #[must_use]
    pub fn level(&self) -> ShareLevel {
        if self.percentage > 50.0 {
            ShareLevel::Dominant
        } else if self.percentage > 20.0 {
            ShareLevel::Significant
        } else {
            ShareLevel::Minor
        }
    }
}

/// Per-language repository counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageBreakdown {
    /// Shares, by count descending then name ascending.
    pub shares: Vec<LanguageShare>,
    /// Number of repositories counted.
    pub total: usize,
}

impl LanguageBreakdown {
    /// Combined share of the `n` most common languages.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn top_share(&self, n: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count: usize = self.shares.iter().take(n).map(|s| s.count).sum();
        count as f64 * 100.0 / self.total as f64
    }

    /// True when there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Groups records by primary language.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn language_breakdown(records: &[RepositoryRecord]) -> LanguageBreakdown {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.language.as_str()).or_default() += 1;
    }

    let total = records.len();
    let mut shares: Vec<LanguageShare> = counts
        .into_iter()
        .map(|(language, count)| LanguageShare {
            language: language.to_string(),
            count,
            percentage: count as f64 * 100.0 / total as f64,
        })
        .collect();
    shares.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.language.cmp(&b.language))
    });

    LanguageBreakdown { shares, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::UNSPECIFIED_LANGUAGE;

    fn record(full_name: &str, language: Option<&str>) -> RepositoryRecord {
        let (owner, name) = full_name.split_once('/').unwrap();
        let builder = RepositoryRecord::builder()
            .full_name(full_name)
            .owner(owner)
            .name(name);
        match language {
            Some(language) => builder.language(language).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn counts_and_orders_languages() {
        let records = vec![
            record("a/1", Some("Rust")),
            record("a/2", Some("Go")),
            record("a/3", Some("Rust")),
            record("a/4", None),
            record("a/5", Some("C")),
        ];
        let breakdown = language_breakdown(&records);

        let order: Vec<_> = breakdown
            .shares
            .iter()
            .map(|s| (s.language.as_str(), s.count))
            .collect();
        assert_eq!(
            order,
            vec![("Rust", 2), ("C", 1), ("Go", 1), (UNSPECIFIED_LANGUAGE, 1)]
        );
        assert_eq!(breakdown.total, 5);
        assert!((breakdown.shares[0].percentage - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bar_length_rounds_down() {
        let share = LanguageShare {
            language: "Rust".to_string(),
            count: 1,
            percentage: 33.3,
        };
        assert_eq!(share.bar_len(50), 16);
        assert_eq!(share.bar_len(100), 33);
        assert_eq!(share.bar_len(0), 0);
    }

    #[test]
    fn share_levels() {
        let share = |percentage| LanguageShare {
            language: "x".to_string(),
            count: 1,
            percentage,
        };
        assert_eq!(share(75.0).level(), ShareLevel::Dominant);
        assert_eq!(share(50.0).level(), ShareLevel::Significant);
        assert_eq!(share(20.0).level(), ShareLevel::Minor);
    }

    #[test]
    fn top_share() {
        let records: Vec<_> = ["A", "A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .enumerate()
            .map(|(i, lang)| record(&format!("o/{i}"), Some(lang)))
            .collect();
        let breakdown = language_breakdown(&records);
        assert_eq!(breakdown.shares.len(), 7);
        assert!((breakdown.top_share(TOP_LANGUAGES) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn empty_records() {
        let breakdown = language_breakdown(&[]);
        assert!(breakdown.is_empty());
        assert!(breakdown.shares.is_empty());
        assert!((breakdown.top_share(5)).abs() < f64::EPSILON);
    }
}
