// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Repowalk Core
//!
//! Core library for the repowalk CLI - rank the GitHub repositories you can
//! see by popularity.
//!
//! This crate provides reusable components for:
//! - GitHub API access with bounded retries and rate limit handling
//! - Scope resolution (personal, all accessible, one organization)
//! - Paginated aggregation with deduplication
//! - Popularity ranking and language statistics
//! - JSON export
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repowalk_core::{
//!     ListRequest, PresetSelector, Scope, ScopeIntent, StaticTokenProvider, collect_ranked,
//!     load_config,
//! };
//!
//! # async fn example() -> repowalk_core::Result<()> {
//! let config = load_config()?;
//! let provider = StaticTokenProvider::new(Some("ghp_example".into()));
//! let request = ListRequest::builder()
//!     .intent(ScopeIntent {
//!         all: true,
//!         ..ScopeIntent::default()
//!     })
//!     .limit(10)
//!     .build();
//!
//! let ranked = collect_ranked(
//!     &provider,
//!     &config,
//!     &request,
//!     &PresetSelector(Scope::Personal),
//!     &mut |_| {},
//! )
//! .await?;
//! for repo in &ranked.records {
//!     println!("{} ({})", repo.full_name, repo.popularity());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub API (auth, pagination, rate limits)
//! - [`repos`] - Records, scope, aggregation, ranking, languages
//! - [`export`] - JSON export

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{StaticTokenProvider, TokenProvider};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{ErrorKind, RepowalkError};

/// Convenience Result type for repowalk operations.
///
/// This is equivalent to `std::result::Result<T, RepowalkError>`.
pub type Result<T> = std::result::Result<T, RepowalkError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, GitHubConfig, RetryConfig, UiConfig, config_dir, config_file_path, load_config,
    load_config_from,
};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::auth::{TokenSource, resolve_token};
pub use github::ratelimit::{RateLimitStatus, check_rate_limit};
pub use github::{GitHubClient, RepositoryApi};

// ============================================================================
// Repositories
// ============================================================================

pub use repos::{
    LanguageBreakdown, LanguageShare, NoPromptSelector, OrgSelector, OrganizationSummary,
    PresetSelector, RepositoryRecord, Scope, ScopeIntent, ShareLevel, TOP_LANGUAGES,
    UNSPECIFIED_LANGUAGE, language_breakdown,
};

// ============================================================================
// Export
// ============================================================================

pub use export::{read_export, to_export_json, write_export};

// ============================================================================
// Retry Logic
// ============================================================================

pub use retry::{RetryPolicy, is_retryable_http};

// ============================================================================
// Utilities
// ============================================================================

pub use utils::{format_optional_time, format_relative_time, format_size, truncate};

// ============================================================================
// Platform-Agnostic Facade
// ============================================================================

pub use facade::{
    ListRequest, Progress, RankedRepositories, authenticated_login, collect_ranked, run_pipeline,
};

// ============================================================================
// Modules
// ============================================================================

pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod facade;
pub mod github;
pub mod repos;
pub mod retry;
pub mod utils;
