// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers for rendering.

use chrono::{DateTime, Utc};
use repowalk_core::{LanguageBreakdown, RepositoryRecord, Scope, TokenSource};
use serde::Serialize;

/// Result from the list command in listing mode.
#[derive(Debug, Clone, Serialize)]
pub struct ListingResult {
    /// Authenticated login.
    pub caller: String,
    /// Scope that was listed.
    pub scope: Scope,
    /// Ranked repositories, after the limit.
    pub repositories: Vec<RepositoryRecord>,
    /// Unique repositories before the limit.
    pub total: usize,
    /// Age in days from which timestamps render as dates.
    #[serde(skip)]
    pub relative_time_days: i64,
    /// Reference time for relative timestamps.
    #[serde(skip)]
    pub now: DateTime<Utc>,
}

/// Result from the list command in language mode.
#[derive(Debug, Clone, Serialize)]
pub struct LanguagesResult {
    /// Authenticated login.
    pub caller: String,
    /// Scope that was listed.
    pub scope: Scope,
    /// Language counts over the ranked repositories.
    pub breakdown: LanguageBreakdown,
    /// Width of a 100% bar.
    #[serde(skip)]
    pub bar_width: usize,
}

/// Result from the auth status command.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatusResult {
    /// Whether GitHub accepted the token.
    pub authenticated: bool,
    /// Where the token came from.
    pub method: Option<TokenSource>,
    /// GitHub login (if authenticated).
    pub username: Option<String>,
}
