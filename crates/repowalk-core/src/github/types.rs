// SPDX-License-Identifier: Apache-2.0

//! Wire types for the GitHub REST endpoints repowalk reads.
//!
//! Only the fields the ranking pipeline needs are modelled; everything is
//! lenient so that partially populated payloads still deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository owner as embedded in repository payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiOwner {
    /// User or organization login.
    pub login: String,
}

/// A repository as returned by `/user/repos` and `/orgs/{org}/repos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRepository {
    /// Repository name.
    pub name: String,
    /// `owner/name`.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Owning account.
    #[serde(default)]
    pub owner: Option<ApiOwner>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language detected by GitHub.
    #[serde(default)]
    pub language: Option<String>,
    /// Stargazer count.
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    /// Watcher count.
    #[serde(default)]
    pub watchers_count: Option<u64>,
    /// Fork count.
    #[serde(default)]
    pub forks_count: Option<u64>,
    /// Repository size in kilobytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork: bool,
    /// Web URL.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An organization as returned by `/user/orgs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiOrganization {
    /// Organization login.
    pub login: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}
