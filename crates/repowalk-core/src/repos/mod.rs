// SPDX-License-Identifier: Apache-2.0

//! Repository records and the ranking pipeline.
//!
//! Raw API payloads are normalized into [`RepositoryRecord`]s, collected per
//! [`Scope`] by the aggregator, ordered by the ranker and summarised by
//! language for the statistics view.

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{ApiOrganization, ApiRepository};

pub mod aggregate;
pub mod languages;
pub mod rank;
pub mod scope;

pub use aggregate::{Aggregation, aggregate};
pub use languages::{
    LanguageBreakdown, LanguageShare, ShareLevel, TOP_LANGUAGES, language_breakdown,
};
pub use rank::{effective_limit, rank, take_limit};
pub use scope::{
    NoPromptSelector, OrgSelector, PresetSelector, Scope, ScopeIntent, list_organizations,
    resolve_scope,
};

/// Language bucket for repositories without a detected primary language.
pub const UNSPECIFIED_LANGUAGE: &str = "unspecified";

/// Normalized metadata for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct RepositoryRecord {
    /// `owner/name`, unique within one run.
    #[builder(into)]
    pub full_name: String,
    /// Owning user or organization login.
    #[builder(into)]
    pub owner: String,
    /// Repository name.
    #[builder(into)]
    pub name: String,
    /// Description, empty when the repository has none.
    #[builder(into, default)]
    pub description: String,
    /// Primary language, [`UNSPECIFIED_LANGUAGE`] when unknown.
    #[builder(into, default = UNSPECIFIED_LANGUAGE.to_string())]
    #[serde(rename = "primary_language")]
    pub language: String,
    /// Stargazer count.
    #[builder(default)]
    #[serde(rename = "star_count")]
    pub stars: u64,
    /// Watcher count.
    #[builder(default)]
    #[serde(rename = "watcher_count")]
    pub watchers: u64,
    /// Fork count.
    #[builder(default)]
    #[serde(rename = "fork_count")]
    pub forks: u64,
    /// Size in kilobytes.
    #[builder(default)]
    pub size_kb: u64,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether the authenticated caller owns the repository.
    #[builder(default)]
    #[serde(rename = "is_owned_by_caller")]
    pub owned_by_caller: bool,
    /// Whether the repository is a fork.
    #[builder(default)]
    #[serde(rename = "is_fork")]
    pub fork: bool,
    /// Web URL.
    #[builder(into, default)]
    pub html_url: String,
}

impl RepositoryRecord {
    /// Normalizes an API payload.
    ///
    /// `caller_login` is compared case-insensitively against the owner login
    /// to decide [`Self::owned_by_caller`].
    #[must_use]
    pub fn from_api(repo: ApiRepository, caller_login: &str) -> Self {
        let owner = repo
            .owner
            .map(|o| o.login)
            .or_else(|| {
                repo.full_name
                    .as_deref()
                    .and_then(|full| full.split_once('/'))
                    .map(|(owner, _)| owner.to_string())
            })
            .unwrap_or_default();
        let full_name = repo
            .full_name
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| format!("{owner}/{}", repo.name));
        let html_url = repo
            .html_url
            .unwrap_or_else(|| format!("https://github.com/{full_name}"));

        Self {
            owned_by_caller: !owner.is_empty() && owner.eq_ignore_ascii_case(caller_login),
            full_name,
            owner,
            name: repo.name,
            description: repo.description.unwrap_or_default(),
            language: repo
                .language
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| UNSPECIFIED_LANGUAGE.to_string()),
            stars: repo.stargazers_count.unwrap_or(0),
            watchers: repo.watchers_count.unwrap_or(0),
            forks: repo.forks_count.unwrap_or(0),
            size_kb: repo.size.unwrap_or(0),
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            fork: repo.fork,
            html_url,
        }
    }

    /// Popularity score: stars plus watchers.
    #[must_use]
    pub fn popularity(&self) -> u64 {
        self.stars.saturating_add(self.watchers)
    }

    /// Key used to collapse the same repository seen through several queries.
    #[must_use]
    pub fn identity(&self) -> String {
        self.full_name.to_lowercase()
    }
}

/// An organization the caller belongs to, offered during scope selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    /// Organization login.
    pub name: String,
    /// Optional description for display.
    pub description: Option<String>,
}

impl From<ApiOrganization> for OrganizationSummary {
    fn from(org: ApiOrganization) -> Self {
        Self {
            name: org.login,
            description: org.description.filter(|d| !d.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::ApiOwner;

    fn api_repo(full_name: &str) -> ApiRepository {
        let (owner, name) = full_name.split_once('/').unwrap();
        ApiRepository {
            name: name.to_string(),
            full_name: Some(full_name.to_string()),
            owner: Some(ApiOwner {
                login: owner.to_string(),
            }),
            stargazers_count: Some(10),
            watchers_count: Some(2),
            ..ApiRepository::default()
        }
    }

    #[test]
    fn normalizes_missing_fields() {
        let record = RepositoryRecord::from_api(api_repo("octocat/hello"), "someone");
        assert_eq!(record.description, "");
        assert_eq!(record.language, UNSPECIFIED_LANGUAGE);
        assert_eq!(record.forks, 0);
        assert_eq!(record.html_url, "https://github.com/octocat/hello");
        assert!(!record.owned_by_caller);
    }

    #[test]
    fn blank_language_is_unspecified() {
        let mut repo = api_repo("octocat/hello");
        repo.language = Some("  ".to_string());
        let record = RepositoryRecord::from_api(repo, "octocat");
        assert_eq!(record.language, UNSPECIFIED_LANGUAGE);
    }

    #[test]
    fn ownership_is_case_insensitive() {
        let record = RepositoryRecord::from_api(api_repo("OctoCat/hello"), "octocat");
        assert!(record.owned_by_caller);
        assert_eq!(record.owner, "OctoCat");
    }

    #[test]
    fn owner_falls_back_to_full_name() {
        let mut repo = api_repo("octocat/hello");
        repo.owner = None;
        let record = RepositoryRecord::from_api(repo, "octocat");
        assert_eq!(record.owner, "octocat");
        assert!(record.owned_by_caller);
    }

    #[test]
    fn full_name_falls_back_to_owner_and_name() {
        let mut repo = api_repo("octocat/hello");
        repo.full_name = None;
        let record = RepositoryRecord::from_api(repo, "octocat");
        assert_eq!(record.full_name, "octocat/hello");
    }

    #[test]
    fn popularity_is_stars_plus_watchers() {
        let record = RepositoryRecord::from_api(api_repo("a/x"), "a");
        assert_eq!(record.popularity(), 12);
    }

    #[test]
    fn builder_defaults() {
        let record = RepositoryRecord::builder()
            .full_name("a/x")
            .owner("a")
            .name("x")
            .stars(3)
            .build();
        assert_eq!(record.language, UNSPECIFIED_LANGUAGE);
        assert_eq!(record.popularity(), 3);
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn organization_summary_from_api() {
        let summary = OrganizationSummary::from(ApiOrganization {
            login: "acme".to_string(),
            description: Some(String::new()),
        });
        assert_eq!(summary.name, "acme");
        assert!(summary.description.is_none());
    }
}
