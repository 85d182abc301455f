// SPDX-License-Identifier: Apache-2.0

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use std::io::{self, Write};

use repowalk_core::{LanguageShare, ShareLevel, TOP_LANGUAGES};

use crate::cli::OutputContext;
use crate::commands::types::LanguagesResult;

use super::Renderable;
use super::repos::repositories;

const BAR_CELL: &str = "█";

fn bar(share: &LanguageShare, width: usize) -> String {
    BAR_CELL.repeat(share.bar_len(width))
}

fn bar_color(level: ShareLevel) -> Color {
    match level {
        ShareLevel::Dominant => Color::Green,
        ShareLevel::Significant => Color::Yellow,
        ShareLevel::Minor => Color::Blue,
    }
}

impl LanguagesResult {
    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Language", "Repositories", "Share", "Distribution"]);
        if !console::colors_enabled() {
            table.force_no_tty();
        }

        for share in &self.breakdown.shares {
            table.add_row(vec![
                Cell::new(&share.language),
                Cell::new(share.count).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1}%", share.percentage))
                    .set_alignment(CellAlignment::Right),
                Cell::new(bar(share, self.bar_width)).fg(bar_color(share.level())),
            ]);
        }
        table
    }

    fn summary(&self) -> Vec<String> {
        let languages = match self.breakdown.shares.len() {
            1 => "1 language".to_string(),
            n => format!("{n} different languages"),
        };
        let mut lines = vec![format!(
            "Found {languages} across {}",
            repositories(self.breakdown.total)
        )];
        if self.breakdown.shares.len() > TOP_LANGUAGES {
            lines.push(format!(
                "Top {TOP_LANGUAGES} languages cover {:.1}% of repositories",
                self.breakdown.top_share(TOP_LANGUAGES)
            ));
        }
        lines
    }
}

impl Renderable for LanguagesResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        writeln!(w, "Authenticated as {}", style(&self.caller).cyan().bold())?;
        writeln!(w, "Scope: {}", style(self.scope.to_string()).cyan())?;
        writeln!(w)?;

        if self.breakdown.is_empty() {
            writeln!(w, "{}", style("No repositories found.").yellow())?;
            writeln!(w)?;
            return Ok(());
        }

        writeln!(w, "{}", self.table())?;
        writeln!(w)?;
        for line in self.summary() {
            writeln!(w, "{}", style(line).bold())?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Languages ({})\n", self.scope)?;
        if self.breakdown.is_empty() {
            writeln!(w, "No repositories found.")?;
            return Ok(());
        }
        writeln!(w, "| Language | Repositories | Share |")?;
        writeln!(w, "|---|---|---|")?;
        for share in &self.breakdown.shares {
            writeln!(
                w,
                "| {} | {} | {:.1}% |",
                share.language, share.count, share.percentage
            )?;
        }
        writeln!(w)?;
        for line in self.summary() {
            writeln!(w, "{line}.")?;
        }
        Ok(())
    }
}
