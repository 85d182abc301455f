// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Defines the paginated API contract the aggregation pipeline drives
//! ([`RepositoryApi`]) and its octocrab-backed implementation.

use async_trait::async_trait;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

pub mod auth;
pub mod client;
pub mod ratelimit;
pub mod types;

pub use client::GitHubClient;
pub use types::{ApiOrganization, ApiOwner, ApiRepository};

use crate::Result;

/// Repository collection endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RepoEndpoint {
    /// `GET /user/repos` - everything visible to the authenticated caller.
    Caller,
    /// `GET /orgs/{org}/repos`.
    Organization(String),
}

impl RepoEndpoint {
    /// Returns the API route for this endpoint.
    #[must_use]
    pub fn route(&self) -> String {
        match self {
            RepoEndpoint::Caller => "/user/repos".to_string(),
            RepoEndpoint::Organization(org) => {
                format!("/orgs/{}/repos", utf8_percent_encode(org, NON_ALPHANUMERIC))
            }
        }
    }
}

/// One page request against a repository endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Endpoint to query.
    pub endpoint: RepoEndpoint,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u8,
}

impl PageRequest {
    /// First page of `endpoint`.
    #[must_use]
    pub fn first(endpoint: RepoEndpoint, per_page: u8) -> Self {
        Self {
            endpoint,
            page: 1,
            per_page,
        }
    }

    /// Request for the given page of the same endpoint.
    #[must_use]
    pub fn at(&self, page: u32) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            page,
            per_page: self.per_page,
        }
    }
}

/// One page of results plus the cursor for the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPage<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Next page number, `None` when this is the last page.
    pub next_page: Option<u32>,
}

impl<T> ApiPage<T> {
    /// A page with no successor.
    #[must_use]
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page: None,
        }
    }
}

/// Paginated GitHub API operations used by the ranking pipeline.
///
/// Implementations own authentication, retries and rate limit handling;
/// callers only see normalized [`crate::RepowalkError`] values.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Login of the authenticated user.
    async fn current_user(&self) -> Result<String>;

    /// One page of the caller's organizations.
    async fn list_organizations(&self, page: u32, per_page: u8)
    -> Result<ApiPage<ApiOrganization>>;

    /// One page of repositories.
    async fn list_repositories(&self, request: &PageRequest) -> Result<ApiPage<ApiRepository>>;
}

/// Extracts the page parameter from a pagination URL.
///
/// GitHub `Link` headers carry URLs such as
/// `https://api.github.com/user/repos?per_page=100&page=2`.
#[must_use]
pub fn page_from_url(url: &str) -> Option<u32> {
    let query_start = url.find('?')?;
    let query = &url[query_start + 1..];

    query
        .split('&')
        .find_map(|param| param.strip_prefix("page="))
        .and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_route() {
        assert_eq!(RepoEndpoint::Caller.route(), "/user/repos");
    }

    #[test]
    fn organization_route_is_encoded() {
        assert_eq!(
            RepoEndpoint::Organization("rust-lang".to_string()).route(),
            "/orgs/rust%2Dlang/repos"
        );
        assert_eq!(
            RepoEndpoint::Organization("a/b".to_string()).route(),
            "/orgs/a%2Fb/repos"
        );
    }

    #[test]
    fn page_request_advances() {
        let first = PageRequest::first(RepoEndpoint::Caller, 50);
        let third = first.at(3);
        assert_eq!(third.page, 3);
        assert_eq!(third.per_page, 50);
        assert_eq!(third.endpoint, RepoEndpoint::Caller);
    }

    #[test]
    fn page_from_url_finds_page() {
        assert_eq!(
            page_from_url("https://api.github.com/user/repos?per_page=100&page=2"),
            Some(2)
        );
        assert_eq!(
            page_from_url("https://api.github.com/user/repos?page=7&per_page=100"),
            Some(7)
        );
    }

    #[test]
    fn page_from_url_without_page() {
        assert_eq!(page_from_url("https://api.github.com/user/repos"), None);
        assert_eq!(
            page_from_url("https://api.github.com/user/repos?per_page=100"),
            None
        );
    }
}
