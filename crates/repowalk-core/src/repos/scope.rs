// SPDX-License-Identifier: Apache-2.0

//! Scope resolution.
//!
//! Turns the scope flags of one invocation into exactly one [`Scope`],
//! asking an [`OrgSelector`] when no flag was given and the caller belongs
//! to at least one organization.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::OrganizationSummary;
use crate::Result;
use crate::error::RepowalkError;
use crate::github::{RepoEndpoint, RepositoryApi};

/// Which repository collection one run enumerates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Scope {
    /// Repositories owned by the caller.
    Personal,
    /// Every repository the caller can see (owned, collaborator, member).
    AllAccessible,
    /// Repositories of one organization.
    Organization(String),
}

impl Scope {
    /// Endpoint that lists this scope.
    #[must_use]
    pub fn endpoint(&self) -> RepoEndpoint {
        match self {
            Scope::Personal | Scope::AllAccessible => RepoEndpoint::Caller,
            Scope::Organization(org) => RepoEndpoint::Organization(org.clone()),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Personal => write!(f, "personal repositories"),
            Scope::AllAccessible => write!(f, "all accessible repositories"),
            Scope::Organization(org) => write!(f, "organization {org}"),
        }
    }
}

/// Scope flags as given on the command line.
///
/// Precedence when several are set: `org` > `all` > `personal`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeIntent {
    /// `--org <name>`.
    pub org: Option<String>,
    /// `--all`.
    pub all: bool,
    /// `--personal`.
    pub personal: bool,
}

impl ScopeIntent {
    /// The scope chosen by flags alone, or `None` when selection is needed.
    ///
    /// # Errors
    ///
    /// Returns `RepowalkError::Config` for a blank organization name.
    pub fn explicit(&self) -> Result<Option<Scope>> {
        if let Some(org) = &self.org {
            let org = org.trim();
            if org.is_empty() {
                return Err(RepowalkError::config("--org requires a non-empty name"));
            }
            return Ok(Some(Scope::Organization(org.to_string())));
        }
        if self.all {
            return Ok(Some(Scope::AllAccessible));
        }
        if self.personal {
            return Ok(Some(Scope::Personal));
        }
        Ok(None)
    }

    /// Names the flags that lost to a higher-precedence one, if any.
    #[must_use]
    pub fn overridden_flags(&self) -> Vec<&'static str> {
        let mut overridden = Vec::new();
        if self.org.is_some() && self.all {
            overridden.push("--all");
        }
        if (self.org.is_some() || self.all) && self.personal {
            overridden.push("--personal");
        }
        overridden
    }
}

/// Chooses a scope among the caller's organizations.
///
/// Implementations range from a terminal prompt to a fixed answer.
pub trait OrgSelector: Send + Sync {
    /// Picks the scope for this run. `organizations` is never empty.
    fn select(&self, organizations: &[OrganizationSummary]) -> Result<Scope>;
}

/// Answers every selection with a fixed scope.
#[derive(Debug, Clone)]
pub struct PresetSelector(pub Scope);

impl OrgSelector for PresetSelector {
    fn select(&self, _organizations: &[OrganizationSummary]) -> Result<Scope> {
        Ok(self.0.clone())
    }
}

/// Refuses to select; used when no terminal is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPromptSelector;

impl OrgSelector for NoPromptSelector {
    fn select(&self, organizations: &[OrganizationSummary]) -> Result<Scope> {
        Err(RepowalkError::config(format!(
            "no scope given and no terminal to choose among {} organization(s); pass --personal, --all or --org <name>",
            organizations.len()
        )))
    }
}

/// Fetches every organization the caller belongs to.
#[instrument(skip(api))]
pub async fn list_organizations(
    api: &dyn RepositoryApi,
    per_page: u8,
) -> Result<Vec<OrganizationSummary>> {
    let mut organizations = Vec::new();
    let mut page = 1;
    loop {
        let result = api.list_organizations(page, per_page).await?;
        organizations.extend(result.items.into_iter().map(OrganizationSummary::from));
        match result.next_page {
            Some(next) if next > page => page = next,
            _ => break,
        }
    }
    debug!(count = organizations.len(), "Listed organizations");
    Ok(organizations)
}

/// Resolves the scope for one run.
///
/// Flags win without any API call. Otherwise the caller's organizations are
/// listed: none means [`Scope::Personal`], some means `selector` decides.
#[instrument(skip(api, selector))]
pub async fn resolve_scope(
    api: &dyn RepositoryApi,
    intent: &ScopeIntent,
    selector: &dyn OrgSelector,
    per_page: u8,
) -> Result<Scope> {
    if let Some(scope) = intent.explicit()? {
        let overridden = intent.overridden_flags();
        if !overridden.is_empty() {
            warn!(
                scope = %scope,
                ignored = %overridden.join(", "),
                "Several scope flags given; using the most specific"
            );
        }
        return Ok(scope);
    }

    let organizations = list_organizations(api, per_page).await?;
    if organizations.is_empty() {
        debug!("No organizations, using personal scope");
        return Ok(Scope::Personal);
    }
    selector.select(&organizations)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::github::{ApiOrganization, ApiPage, ApiRepository, PageRequest};

    struct OrgsApi {
        pages: Vec<Vec<&'static str>>,
        calls: AtomicU32,
    }

    impl OrgsApi {
        fn new(pages: Vec<Vec<&'static str>>) -> Self {
            Self {
                pages,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl RepositoryApi for OrgsApi {
        async fn current_user(&self) -> Result<String> {
            Ok("octocat".to_string())
        }

        async fn list_organizations(
            &self,
            page: u32,
            _per_page: u8,
        ) -> Result<ApiPage<ApiOrganization>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let index = page as usize - 1;
            let items = self.pages.get(index).cloned().unwrap_or_default();
            Ok(ApiPage {
                items: items
                    .into_iter()
                    .map(|login| ApiOrganization {
                        login: login.to_string(),
                        description: None,
                    })
                    .collect(),
                next_page: (index + 1 < self.pages.len()).then_some(page + 1),
            })
        }

        async fn list_repositories(
            &self,
            _request: &PageRequest,
        ) -> Result<ApiPage<ApiRepository>> {
            Ok(ApiPage::last(Vec::new()))
        }
    }

    #[test]
    fn org_wins_over_all_and_personal() {
        let intent = ScopeIntent {
            org: Some("acme".to_string()),
            all: true,
            personal: true,
        };
        assert_eq!(
            intent.explicit().unwrap(),
            Some(Scope::Organization("acme".to_string()))
        );
        assert_eq!(intent.overridden_flags(), vec!["--all", "--personal"]);
    }

    #[test]
    fn all_wins_over_personal() {
        let intent = ScopeIntent {
            org: None,
            all: true,
            personal: true,
        };
        assert_eq!(intent.explicit().unwrap(), Some(Scope::AllAccessible));
        assert_eq!(intent.overridden_flags(), vec!["--personal"]);
    }

    #[test]
    fn single_flag_overrides_nothing() {
        let intent = ScopeIntent {
            personal: true,
            ..ScopeIntent::default()
        };
        assert_eq!(intent.explicit().unwrap(), Some(Scope::Personal));
        assert!(intent.overridden_flags().is_empty());
        assert_eq!(ScopeIntent::default().explicit().unwrap(), None);
    }

    #[test]
    fn blank_org_is_config_error() {
        let intent = ScopeIntent {
            org: Some("  ".to_string()),
            ..ScopeIntent::default()
        };
        assert!(matches!(
            intent.explicit(),
            Err(RepowalkError::Config { .. })
        ));
    }

    #[test]
    fn scope_endpoints() {
        assert_eq!(Scope::Personal.endpoint(), RepoEndpoint::Caller);
        assert_eq!(Scope::AllAccessible.endpoint(), RepoEndpoint::Caller);
        assert_eq!(
            Scope::Organization("acme".to_string()).endpoint(),
            RepoEndpoint::Organization("acme".to_string())
        );
    }

    #[tokio::test]
    async fn explicit_flag_skips_api() {
        let api = OrgsApi::new(vec![vec!["acme"]]);
        let intent = ScopeIntent {
            all: true,
            ..ScopeIntent::default()
        };
        let scope = resolve_scope(&api, &intent, &NoPromptSelector, 100)
            .await
            .unwrap();
        assert_eq!(scope, Scope::AllAccessible);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_organizations_means_personal() {
        let api = OrgsApi::new(vec![]);
        let scope = resolve_scope(&api, &ScopeIntent::default(), &NoPromptSelector, 100)
            .await
            .unwrap();
        assert_eq!(scope, Scope::Personal);
    }

    #[tokio::test]
    async fn selector_decides_with_organizations() {
        let api = OrgsApi::new(vec![vec!["acme"], vec!["globex"]]);
        let selector = PresetSelector(Scope::Organization("globex".to_string()));
        let scope = resolve_scope(&api, &ScopeIntent::default(), &selector, 1)
            .await
            .unwrap();
        assert_eq!(scope, Scope::Organization("globex".to_string()));
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_interactive_with_organizations_fails() {
        let api = OrgsApi::new(vec![vec!["acme"]]);
        let err = resolve_scope(&api, &ScopeIntent::default(), &NoPromptSelector, 100)
            .await
            .unwrap_err();
        assert!(matches!(err, RepowalkError::Config { .. }));
    }

    #[tokio::test]
    async fn lists_all_organization_pages() {
        let api = OrgsApi::new(vec![vec!["acme", "globex"], vec!["initech"]]);
        let orgs = list_organizations(&api, 2).await.unwrap();
        let names: Vec<_> = orgs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["acme", "globex", "initech"]);
    }
}
