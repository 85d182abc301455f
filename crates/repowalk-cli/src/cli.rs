// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for repowalk.
//!
//! Uses clap's derive API. Listing is the default command, so the listing
//! flags are accepted both bare (`repowalk --all`) and under `list`.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use repowalk_core::ScopeIntent;

/// Extended help text for the generate subcommand with shell-specific examples.
const COMPLETION_GENERATE_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc or ~/.bash_profile:
      eval "$(repowalk completion generate bash)"

  zsh
    Generate completion file:
      mkdir -p ~/.zsh/completions
      repowalk completion generate zsh > ~/.zsh/completions/_repowalk

    Add to ~/.zshrc (before compinit):
      fpath=(~/.zsh/completions $fpath)
      autoload -U compinit && compinit -i

  fish
    Generate completion file:
      repowalk completion generate fish > ~/.config/fish/completions/repowalk.fish
"#;

const SCOPE_HELP: &str = "SCOPE

  --org <name> wins over --all, which wins over --personal; a warning names
  the ignored flags. Without any scope flag you are asked to choose among
  your organizations (personal repositories when you have none).";

/// Output format for CLI results.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
    /// Markdown output
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json, yaml, markdown)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress)
    pub quiet: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// repowalk - rank the GitHub repositories you can see by popularity.
///
/// Lists personal, all accessible, or organization repositories sorted by
/// stars plus watchers, with an optional language breakdown and JSON export.
#[derive(Parser)]
#[command(name = "repowalk")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = SCOPE_HELP)]
pub struct Cli {
    /// Output format (text, json, yaml, markdown)
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Suppress non-essential output (spinners, progress)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug-level logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute (defaults to `list`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub list: ListArgs,
}

impl Cli {
    /// The command to run, with `list` filled in when none was given.
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::List(self.list))
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Rank repositories by popularity (default)
    #[command(after_help = SCOPE_HELP)]
    List(ListArgs),

    /// Inspect GitHub authentication
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Generate shell completion scripts
    #[command(subcommand)]
    Completion(CompletionCommand),
}

/// Listing options.
#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Show language statistics instead of the repository listing
    #[arg(long, short = 'l')]
    pub languages: bool,

    /// Also write the ranked repositories to this JSON file
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Only repositories you own
    #[arg(long)]
    pub personal: bool,

    /// Every repository you can access
    #[arg(long)]
    pub all: bool,

    /// Repositories of one organization
    #[arg(long, value_name = "NAME")]
    pub org: Option<String>,

    /// Show at most N repositories (0 or less shows all)
    #[arg(long, short = 'm', value_name = "N", allow_negative_numbers = true)]
    pub limit: Option<i64>,
}

impl ListArgs {
    /// Scope flags as a core intent.
    pub fn intent(&self) -> ScopeIntent {
        ScopeIntent {
            org: self.org.clone(),
            all: self.all,
            personal: self.personal,
        }
    }
}

/// Authentication subcommands
#[derive(Subcommand)]
pub enum AuthCommand {
    /// Show which token is used and who it belongs to
    Status,
}

/// Completion subcommands
#[derive(Subcommand)]
pub enum CompletionCommand {
    /// Generate completion script for a shell (output to stdout)
    #[command(after_long_help = COMPLETION_GENERATE_HELP)]
    Generate {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
