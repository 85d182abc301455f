// SPDX-License-Identifier: Apache-2.0

//! Paginated aggregation of repositories for one scope.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use super::{RepositoryRecord, Scope};
use crate::Result;
use crate::error::RepowalkError;
use crate::github::{PageRequest, RepositoryApi};

/// Outcome of aggregating one scope.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Unique records in first-seen order.
    pub records: Vec<RepositoryRecord>,
    /// Pages fetched.
    pub pages: u32,
    /// Records dropped because an earlier page already had them.
    pub duplicates: usize,
    /// Records dropped by the personal ownership filter.
    pub not_owned: usize,
}

/// Fetches every page of `scope` and collapses duplicates.
///
/// The first occurrence of a repository wins. For [`Scope::Personal`] only
/// repositories owned by `caller_login` are kept. `on_page` receives the page
/// number just fetched and the running record count.
///
/// # Errors
///
/// Authentication failures are returned unchanged. Any other failure after
/// the first page has been collected becomes `RepowalkError::Aggregation` and
/// the records gathered so far are dropped; failures on the first page are
/// returned unchanged.
#[instrument(skip(api, on_page), fields(scope = %scope))]
pub async fn aggregate(
    api: &dyn RepositoryApi,
    scope: &Scope,
    caller_login: &str,
    per_page: u8,
    on_page: &mut (dyn FnMut(u32, usize) + Send),
) -> Result<Aggregation> {
    let first = PageRequest::first(scope.endpoint(), per_page);
    let mut request = first.clone();
    let mut seen = HashSet::new();
    let mut aggregation = Aggregation::default();

    loop {
        let page = match api.list_repositories(&request).await {
            Ok(page) => page,
            Err(err) => return Err(interrupted(scope, request.page, &aggregation, err)),
        };
        aggregation.pages += 1;

        for repo in page.items {
            let record = RepositoryRecord::from_api(repo, caller_login);
            if *scope == Scope::Personal && !record.owned_by_caller {
                aggregation.not_owned += 1;
                continue;
            }
            if seen.insert(record.identity()) {
                aggregation.records.push(record);
            } else {
                aggregation.duplicates += 1;
            }
        }

        debug!(
            page = request.page,
            collected = aggregation.records.len(),
            "Fetched repository page"
        );
        on_page(request.page, aggregation.records.len());

        match page.next_page {
            Some(next) if next > request.page => request = first.at(next),
            Some(next) => {
                warn!(
                    page = request.page,
                    next, "Ignoring pagination link that does not advance"
                );
                break;
            }
            None => break,
        }
    }

    debug!(
        records = aggregation.records.len(),
        pages = aggregation.pages,
        duplicates = aggregation.duplicates,
        not_owned = aggregation.not_owned,
        "Aggregation complete"
    );
    Ok(aggregation)
}

fn interrupted(
    scope: &Scope,
    page: u32,
    aggregation: &Aggregation,
    err: RepowalkError,
) -> RepowalkError {
    match err {
        RepowalkError::NotAuthenticated | RepowalkError::Auth { .. } => err,
        err if aggregation.pages == 0 => err,
        err => {
            warn!(
                page,
                discarded = aggregation.records.len(),
                error = %err,
                "Pagination interrupted, discarding partial results"
            );
            RepowalkError::Aggregation {
                scope: scope.to_string(),
                page,
                discarded: aggregation.records.len(),
                source: Box::new(err),
            }
        }
    }
}
