// SPDX-License-Identifier: Apache-2.0

//! Shell completion generation.

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

use crate::cli::Cli;

/// Writes the completion script for `shell` to stdout.
pub fn run_generate(shell: Shell) -> Result<()> {
    let mut stdout = std::io::stdout();
    write_completions(shell, &mut stdout);
    stdout.flush().context("Failed to write completion script")
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_mentions_subcommands() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("repowalk"));
        assert!(script.contains("completion"));
        assert!(script.contains("--org"));
    }

    #[test]
    fn fish_script_is_generated() {
        let mut buf = Vec::new();
        write_completions(Shell::Fish, &mut buf);
        assert!(!buf.is_empty());
    }
}
