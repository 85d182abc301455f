// SPDX-License-Identifier: Apache-2.0

//! Repository ranking and language statistics.

use anyhow::Result;
use chrono::Utc;
use console::style;
use indicatif::ProgressBar;
use repowalk_core::{
    AppConfig, ListRequest, Progress, RankedRepositories, collect_ranked, language_breakdown,
    write_export,
};
use tracing::debug;

use super::maybe_spinner;
use super::types::{LanguagesResult, ListingResult};
use crate::cli::{ListArgs, OutputContext};
use crate::output;
use crate::prompt::selector_for_terminal;
use crate::provider::CliTokenProvider;

/// Ranks the repositories of the chosen scope and renders them.
pub async fn run(args: &ListArgs, ctx: &OutputContext, config: &AppConfig) -> Result<()> {
    let provider = CliTokenProvider::new(&config.github);
    let selector = selector_for_terminal();
    let request = ListRequest::builder()
        .intent(args.intent())
        .maybe_limit(args.limit)
        .per_page(config.github.page_size())
        .build();

    let mut spinner: Option<ProgressBar> = None;
    let mut on_progress = |event: Progress| match event {
        Progress::Authenticated { login } => debug!(login = %login, "Authenticated"),
        Progress::ScopeResolved(scope) => {
            spinner = maybe_spinner(ctx, &format!("Fetching {scope}..."));
        }
        Progress::Page { page, collected } => {
            if let Some(s) = &spinner {
                s.set_message(format!("Fetched page {page} ({collected} repositories)"));
            }
        }
    };

    let outcome = collect_ranked(
        &provider,
        config,
        &request,
        selector.as_ref(),
        &mut on_progress,
    )
    .await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    let ranked = outcome?;

    if let Some(path) = &args.output {
        write_export(path, &ranked.records)?;
        if !ctx.quiet {
            eprintln!(
                "{} Exported {} repositories to {}",
                style("*").green().bold(),
                ranked.records.len(),
                path.display()
            );
        }
    }

    if args.languages {
        output::render(&languages_result(ranked, config), ctx)
    } else {
        output::render(&listing_result(ranked, config), ctx)
    }
}

fn listing_result(ranked: RankedRepositories, config: &AppConfig) -> ListingResult {
    ListingResult {
        caller: ranked.caller,
        scope: ranked.scope,
        repositories: ranked.records,
        total: ranked.total,
        relative_time_days: config.ui.relative_time_days,
        now: Utc::now(),
    }
}

fn languages_result(ranked: RankedRepositories, config: &AppConfig) -> LanguagesResult {
    LanguagesResult {
        breakdown: language_breakdown(&ranked.records),
        caller: ranked.caller,
        scope: ranked.scope,
        bar_width: config.ui.bar_width,
    }
}
