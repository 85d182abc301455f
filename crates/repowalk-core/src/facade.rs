// SPDX-License-Identifier: Apache-2.0

//! Platform-agnostic facade over the ranking pipeline.
//!
//! Front ends supply a [`TokenProvider`] and an [`OrgSelector`]; this module
//! builds the API client and drives identity check, scope resolution,
//! aggregation and ranking in sequence.

use bon::Builder;
use serde::Serialize;
use tracing::{info, instrument};

use crate::Result;
use crate::auth::TokenProvider;
use crate::config::AppConfig;
use crate::error::RepowalkError;
use crate::github::{GitHubClient, RepositoryApi};
use crate::repos::{
    OrgSelector, RepositoryRecord, Scope, ScopeIntent, aggregate, effective_limit, rank,
    resolve_scope, take_limit,
};

/// What one listing run should do.
#[derive(Debug, Clone, Builder)]
pub struct ListRequest {
    /// Scope flags.
    #[builder(default)]
    pub intent: ScopeIntent,
    /// Requested result cap; zero or negative means unlimited.
    pub limit: Option<i64>,
    /// Page size for list endpoints.
    #[builder(default = 100)]
    pub per_page: u8,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Pipeline progress reported to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The caller's identity was confirmed.
    Authenticated {
        /// Caller login.
        login: String,
    },
    /// The scope is fixed; aggregation starts next.
    ScopeResolved(Scope),
    /// A repository page was fetched.
    Page {
        /// Page number just fetched.
        page: u32,
        /// Unique records collected so far.
        collected: usize,
    },
}

/// Ranked result of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RankedRepositories {
    /// Authenticated login.
    pub caller: String,
    /// Scope that was listed.
    pub scope: Scope,
    /// Records after ranking and limiting.
    pub records: Vec<RepositoryRecord>,
    /// Unique records before the limit was applied.
    pub total: usize,
}

impl RankedRepositories {
    /// True when the limit removed records.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.records.len() < self.total
    }
}

/// Runs the pipeline against GitHub.
///
/// # Errors
///
/// Returns `RepowalkError::NotAuthenticated` before any network call when the
/// provider has no token, and any pipeline error otherwise.
#[instrument(skip_all)]
pub async fn collect_ranked(
    provider: &dyn TokenProvider,
    config: &AppConfig,
    request: &ListRequest,
    selector: &dyn OrgSelector,
    on_progress: &mut (dyn FnMut(Progress) + Send),
) -> Result<RankedRepositories> {
    let token = provider
        .github_token()
        .ok_or(RepowalkError::NotAuthenticated)?;
    let client = GitHubClient::from_token(&token, &config.github, config.retry.policy())?;
    run_pipeline(&client, request, selector, on_progress).await
}

/// Runs the pipeline against any [`RepositoryApi`].
///
/// # Errors
///
/// Returns the first error of identity check, scope resolution or
/// aggregation. No partial result is ever returned.
#[instrument(skip_all, fields(intent = ?request.intent, limit = ?request.limit))]
pub async fn run_pipeline(
    api: &dyn RepositoryApi,
    request: &ListRequest,
    selector: &dyn OrgSelector,
    on_progress: &mut (dyn FnMut(Progress) + Send),
) -> Result<RankedRepositories> {
    let limit = effective_limit(request.limit);
    let per_page = request.per_page.clamp(1, 100);

    let caller = api.current_user().await?;
    on_progress(Progress::Authenticated {
        login: caller.clone(),
    });

    let scope = resolve_scope(api, &request.intent, selector, per_page).await?;
    info!(scope = %scope, "Resolved scope");
    on_progress(Progress::ScopeResolved(scope.clone()));

    let aggregation = aggregate(api, &scope, &caller, per_page, &mut |page, collected| {
        on_progress(Progress::Page { page, collected });
    })
    .await?;

    let total = aggregation.records.len();
    let records = take_limit(rank(aggregation.records), limit);
    info!(total, shown = records.len(), "Ranked repositories");

    Ok(RankedRepositories {
        caller,
        scope,
        records,
        total,
    })
}

/// Checks which login a token belongs to.
///
/// # Errors
///
/// Returns `RepowalkError::NotAuthenticated` when the provider has no token
/// and `RepowalkError::Auth` when GitHub rejects it.
#[instrument(skip_all)]
pub async fn authenticated_login(
    provider: &dyn TokenProvider,
    config: &AppConfig,
) -> Result<String> {
    let token = provider
        .github_token()
        .ok_or(RepowalkError::NotAuthenticated)?;
    let client = GitHubClient::from_token(&token, &config.github, config.retry.policy())?;
    client.current_user().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;
    use crate::repos::NoPromptSelector;

    #[tokio::test]
    async fn missing_token_fails_before_network() {
        let provider = StaticTokenProvider::new(None);
        let err = collect_ranked(
            &provider,
            &AppConfig::default(),
            &ListRequest::default(),
            &NoPromptSelector,
            &mut |_| {},
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepowalkError::NotAuthenticated));
    }

    #[tokio::test]
    async fn auth_status_without_token() {
        let provider = StaticTokenProvider::new(None);
        let err = authenticated_login(&provider, &AppConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepowalkError::NotAuthenticated));
    }

    #[test]
    fn request_builder_defaults() {
        let request = ListRequest::builder().limit(5).build();
        assert_eq!(request.per_page, 100);
        assert_eq!(request.limit, Some(5));
        assert_eq!(request.intent, ScopeIntent::default());
    }
}
