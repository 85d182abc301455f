// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::AuthStatusResult;

use super::Renderable;

impl Renderable for AuthStatusResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        if self.authenticated {
            writeln!(w, "{} Authenticated with GitHub", style("*").green().bold())?;
            if let Some(ref method) = self.method {
                writeln!(w, "  Method: {}", style(method.to_string()).cyan())?;
            }
            if let Some(ref username) = self.username {
                writeln!(w, "  Username: {}", style(username).cyan())?;
            }
        } else {
            writeln!(
                w,
                "{} Not authenticated. Set {} or run {}.",
                style("!").yellow().bold(),
                style("GH_TOKEN").cyan(),
                style("gh auth login").cyan()
            )?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Authentication Status\n")?;
        if self.authenticated {
            writeln!(w, "**Status:** Authenticated")?;
            if let Some(ref method) = self.method {
                writeln!(w, "**Method:** {method}")?;
            }
            if let Some(ref username) = self.username {
                writeln!(w, "**Username:** {username}")?;
            }
        } else {
            writeln!(w, "**Status:** Not authenticated")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use repowalk_core::TokenSource;

    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::test_context;

    #[test]
    fn markdown_names_source_and_login() {
        let result = AuthStatusResult {
            authenticated: true,
            method: Some(TokenSource::GhCli),
            username: Some("octocat".to_string()),
        };
        let mut buf = Vec::new();
        result
            .render_markdown(&mut buf, &test_context(OutputFormat::Markdown))
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("**Method:** GitHub CLI"));
        assert!(text.contains("**Username:** octocat"));
    }
}
