// SPDX-License-Identifier: Apache-2.0

//! Octocrab-backed [`RepositoryApi`] implementation.
//!
//! Every request runs through [`GitHubClient::call`], which retries
//! transient failures with the configured backoff and, on a rate limit
//! rejection, either sleeps until the window resets (once) or fails.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use backon::Retryable;
use chrono::{DateTime, Utc};
use octocrab::{Octocrab, Page};
use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::auth::create_client_with_token;
use super::ratelimit::check_rate_limit;
use super::types::{ApiOrganization, ApiRepository};
use super::{ApiPage, PageRequest, RepositoryApi, page_from_url};
use crate::Result;
use crate::config::GitHubConfig;
use crate::error::RepowalkError;
use crate::retry::{RetryPolicy, is_retryable_http, rate_limit_wait};

#[derive(Serialize)]
struct ListParams {
    per_page: u8,
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'static str>,
}

#[derive(serde::Deserialize)]
struct AuthenticatedUser {
    login: String,
}

/// GitHub REST client with bounded retries and rate limit handling.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    retry: RetryPolicy,
    max_rate_limit_wait: Duration,
}

impl GitHubClient {
    /// Wraps an existing octocrab instance.
    #[must_use]
    pub fn new(octocrab: Octocrab, retry: RetryPolicy, max_rate_limit_wait: Duration) -> Self {
        Self {
            octocrab,
            retry,
            max_rate_limit_wait,
        }
    }

    /// Builds a client from a token and the GitHub settings.
    ///
    /// # Errors
    ///
    /// Returns `RepowalkError::Config` if the client cannot be built.
    pub fn from_token(
        token: &SecretString,
        config: &GitHubConfig,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let octocrab = create_client_with_token(token, config)?;
        Ok(Self::new(octocrab, retry, config.max_rate_limit_wait()))
    }

    /// Runs `op` with transient retries and at most one rate limit wait.
    async fn call<T, F, Fut>(&self, operation: &'static str, op: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut waited = false;
        loop {
            let result = (&op)
                .retry(self.retry.backoff())
                .when(RepowalkError::is_transient)
                .notify(|err: &RepowalkError, delay: Duration| {
                    warn!(
                        operation,
                        error = %err,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Retrying GitHub request"
                    );
                })
                .await;

            match result {
                Err(RepowalkError::RateLimited { reset_at }) if !waited => {
                    let reset_at = match reset_at {
                        Some(at) => Some(at),
                        None => self.rate_limit_reset().await,
                    };
                    let Some(wait) = rate_limit_wait(reset_at, Utc::now(), self.max_rate_limit_wait)
                    else {
                        return Err(RepowalkError::RateLimited { reset_at });
                    };
                    warn!(
                        operation,
                        reset_at = ?reset_at,
                        delay_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                        "Rate limited, waiting for reset"
                    );
                    tokio::time::sleep(wait).await;
                    waited = true;
                }
                Err(RepowalkError::RateLimited { reset_at }) => {
                    let reset_at = match reset_at {
                        Some(at) => Some(at),
                        None => self.rate_limit_reset().await,
                    };
                    return Err(RepowalkError::RateLimited { reset_at });
                }
                Err(RepowalkError::Transient { message, .. }) => {
                    return Err(RepowalkError::Transient {
                        message,
                        attempts: self.retry.attempts(),
                    });
                }
                other => return other,
            }
        }
    }

    async fn rate_limit_reset(&self) -> Option<DateTime<Utc>> {
        match check_rate_limit(&self.octocrab).await {
            Ok(status) => {
                if !status.is_exhausted() {
                    debug!(
                        status = %status.message(),
                        "Core window not exhausted, likely a secondary limit"
                    );
                }
                status.reset_time()
            }
            Err(e) => {
                debug!(error = %e, "Could not read rate limit reset time");
                None
            }
        }
    }

    async fn get_page<T>(&self, route: &str, params: &ListParams) -> Result<ApiPage<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let page: Page<T> = self
            .octocrab
            .get(route, Some(params))
            .await
            .map_err(classify_error)?;
        let next_page = page
            .next
            .as_ref()
            .and_then(|uri| page_from_url(&uri.to_string()));
        Ok(ApiPage {
            items: page.items,
            next_page,
        })
    }
}

#[async_trait]
impl RepositoryApi for GitHubClient {
    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<String> {
        let user = self
            .call("current_user", || async {
                self.octocrab
                    .get::<AuthenticatedUser, _, ()>("/user", None)
                    .await
                    .map_err(classify_error)
            })
            .await?;
        debug!(login = %user.login, "Authenticated user");
        Ok(user.login)
    }

    #[instrument(skip(self))]
    async fn list_organizations(
        &self,
        page: u32,
        per_page: u8,
    ) -> Result<ApiPage<ApiOrganization>> {
        let params = ListParams {
            per_page,
            page,
            sort: None,
        };
        self.call("list_organizations", || {
            self.get_page::<ApiOrganization>("/user/orgs", &params)
        })
        .await
    }

    #[instrument(skip(self), fields(route = %request.endpoint.route(), page = request.page))]
    async fn list_repositories(&self, request: &PageRequest) -> Result<ApiPage<ApiRepository>> {
        let route = request.endpoint.route();
        let params = ListParams {
            per_page: request.per_page,
            page: request.page,
            sort: Some("full_name"),
        };
        self.call("list_repositories", || {
            self.get_page::<ApiRepository>(&route, &params)
        })
        .await
    }
}

/// Maps an octocrab error onto the repowalk taxonomy.
fn classify_error(err: octocrab::Error) -> RepowalkError {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            classify_status(source.status_code.as_u16(), source.message.clone())
        }
        octocrab::Error::Hyper { source, .. } => RepowalkError::Transient {
            message: source.to_string(),
            attempts: 1,
        },
        octocrab::Error::Service { source, .. } => RepowalkError::Transient {
            message: source.to_string(),
            attempts: 1,
        },
        other => RepowalkError::GitHub {
            message: other.to_string(),
            status: None,
        },
    }
}

/// Maps an HTTP error status and GitHub message onto the repowalk taxonomy.
///
/// GitHub reports primary rate limits as 403 with a "rate limit" message and
/// secondary ones as 403 or 429.
pub(crate) fn classify_status(status: u16, message: String) -> RepowalkError {
    match status {
        401 => RepowalkError::Auth { message },
        429 => RepowalkError::RateLimited { reset_at: None },
        403 if message.to_lowercase().contains("rate limit") => {
            RepowalkError::RateLimited { reset_at: None }
        }
        s if is_retryable_http(s) => RepowalkError::Transient {
            message: format!("HTTP {s}: {message}"),
            attempts: 1,
        },
        s => RepowalkError::GitHub {
            message: format!("HTTP {s}: {message}"),
            status: Some(s),
        },
    }
}
