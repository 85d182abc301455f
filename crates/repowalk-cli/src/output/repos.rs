// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use repowalk_core::utils::{format_optional_time, format_size, truncate};
use repowalk_core::RepositoryRecord;

use crate::cli::OutputContext;
use crate::commands::types::ListingResult;

use super::Renderable;

const DESCRIPTION_WIDTH: usize = 100;

fn description(repo: &RepositoryRecord) -> String {
    if repo.description.trim().is_empty() {
        "No description".to_string()
    } else {
        truncate(repo.description.trim(), DESCRIPTION_WIDTH)
    }
}

/// `1 repository`, `2 repositories`.
pub(super) fn repositories(count: usize) -> String {
    if count == 1 {
        "1 repository".to_string()
    } else {
        format!("{count} repositories")
    }
}

impl ListingResult {
    fn summary(&self) -> String {
        if self.repositories.len() < self.total {
            format!(
                "Found {} (showing {} of {})",
                repositories(self.total),
                self.repositories.len(),
                self.total
            )
        } else {
            format!("Found {}", repositories(self.total))
        }
    }

    fn when(&self, repo: &RepositoryRecord) -> (String, String) {
        (
            format_optional_time(repo.updated_at.as_ref(), self.now, self.relative_time_days),
            format_optional_time(repo.created_at.as_ref(), self.now, self.relative_time_days),
        )
    }
}

impl Renderable for ListingResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        writeln!(w, "Authenticated as {}", style(&self.caller).cyan().bold())?;
        writeln!(w, "Scope: {}", style(self.scope.to_string()).cyan())?;
        writeln!(w)?;

        if self.repositories.is_empty() {
            writeln!(w, "{}", style("No repositories found.").yellow())?;
            writeln!(w)?;
            return Ok(());
        }

        writeln!(w, "{}", style(self.summary()).bold())?;
        writeln!(w)?;

        for (i, repo) in self.repositories.iter().enumerate() {
            let (updated, created) = self.when(repo);
            writeln!(
                w,
                "{} {}",
                style(format!("{:>3}.", i + 1)).dim(),
                style(&repo.full_name).cyan().bold()
            )?;
            writeln!(w, "     {}", style(description(repo)).dim())?;
            writeln!(
                w,
                "     {} {}  {} {}  {} {}  {} {}  {} {}",
                style("Language:").dim(),
                style(&repo.language).yellow(),
                style("Stars:").dim(),
                repo.stars,
                style("Watchers:").dim(),
                repo.watchers,
                style("Forks:").dim(),
                repo.forks,
                style("Size:").dim(),
                format_size(repo.size_kb)
            )?;
            writeln!(
                w,
                "     {} {}  {} {}",
                style("Updated:").dim(),
                updated,
                style("Created:").dim(),
                created
            )?;
            writeln!(w, "     {}", style(&repo.html_url).underlined())?;
            writeln!(w)?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Repositories ({})\n", self.scope)?;
        writeln!(w, "Authenticated as **{}**. {}.\n", self.caller, self.summary())?;
        if self.repositories.is_empty() {
            writeln!(w, "No repositories found.")?;
            return Ok(());
        }
        writeln!(
            w,
            "| # | Repository | Language | Stars | Watchers | Popularity | Forks | Size | Updated |"
        )?;
        writeln!(w, "|---|---|---|---|---|---|---|---|---|")?;
        for (i, repo) in self.repositories.iter().enumerate() {
            let (updated, _) = self.when(repo);
            writeln!(
                w,
                "| {} | [{}]({}) | {} | {} | {} | {} | {} | {} | {} |",
                i + 1,
                repo.full_name,
                repo.html_url,
                repo.language,
                repo.stars,
                repo.watchers,
                repo.popularity(),
                repo.forks,
                format_size(repo.size_kb),
                updated
            )?;
        }
        Ok(())
    }
}
