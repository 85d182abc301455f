// SPDX-License-Identifier: Apache-2.0

//! Popularity ranking.

use std::cmp::Ordering;

use tracing::warn;

use super::RepositoryRecord;

fn by_popularity(a: &RepositoryRecord, b: &RepositoryRecord) -> Ordering {
    b.popularity()
        .cmp(&a.popularity())
        .then_with(|| a.full_name.cmp(&b.full_name))
}

/// Sorts records by popularity, highest first.
///
/// Equal scores are ordered by full name ascending so identical input
/// always produces identical output.
#[must_use]
pub fn rank(mut records: Vec<RepositoryRecord>) -> Vec<RepositoryRecord> {
    records.sort_by(by_popularity);
    records
}

/// Interprets a requested limit. Zero or negative means unlimited.
#[must_use]
pub fn effective_limit(requested: Option<i64>) -> Option<usize> {
    match requested {
        Some(n) if n > 0 => Some(usize::try_from(n).unwrap_or(usize::MAX)),
        Some(n) => {
            warn!(limit = n, "Limit must be positive; showing all repositories");
            None
        }
        None => None,
    }
}

/// Keeps the first `limit` ranked records.
#[must_use]
pub fn take_limit(mut ranked: Vec<RepositoryRecord>, limit: Option<usize>) -> Vec<RepositoryRecord> {
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(full_name: &str, stars: u64, watchers: u64) -> RepositoryRecord {
        let (owner, name) = full_name.split_once('/').unwrap();
        RepositoryRecord::builder()
            .full_name(full_name)
            .owner(owner)
            .name(name)
            .stars(stars)
            .watchers(watchers)
            .build()
    }

    fn names(records: &[RepositoryRecord]) -> Vec<&str> {
        records.iter().map(|r| r.full_name.as_str()).collect()
    }

    fn sample() -> Vec<RepositoryRecord> {
        vec![
            record("b/tie", 3, 3),
            record("a/low", 1, 0),
            record("z/top", 40, 2),
            record("a/tie", 5, 1),
            record("c/mid", 10, 0),
        ]
    }

    #[test]
    fn ranks_by_score_then_name() {
        let ranked = rank(sample());
        assert_eq!(
            names(&ranked),
            vec!["z/top", "c/mid", "a/tie", "b/tie", "a/low"]
        );
        for pair in ranked.windows(2) {
            assert!(pair[0].popularity() >= pair[1].popularity());
        }
    }

    #[test]
    fn ranking_is_independent_of_input_order() {
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(rank(sample()), rank(reversed));
    }

    #[test]
    fn limit_is_prefix_of_full_ranking() {
        let full = rank(sample());
        for n in 1..=7 {
            let limited = take_limit(rank(sample()), effective_limit(Some(n)));
            let expected = usize::try_from(n).unwrap().min(full.len());
            assert_eq!(limited.len(), expected);
            assert_eq!(limited[..], full[..expected]);
        }
    }

    #[test]
    fn non_positive_limit_is_unlimited() {
        assert_eq!(effective_limit(Some(0)), None);
        assert_eq!(effective_limit(Some(-3)), None);
        assert_eq!(effective_limit(None), None);
        assert_eq!(take_limit(rank(sample()), effective_limit(Some(0))).len(), 5);
    }

    #[test]
    fn empty_input() {
        assert!(rank(Vec::new()).is_empty());
    }
}
