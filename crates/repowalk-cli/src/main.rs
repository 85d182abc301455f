// SPDX-License-Identifier: Apache-2.0

//! repowalk - rank the GitHub repositories you can see by popularity.
//!
//! Lists personal, all accessible, or organization repositories ordered by
//! stars plus watchers, with language statistics and JSON export.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod prompt;
mod provider;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use repowalk_core::load_config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", errors::format_error(&e));
            errors::exit_code(&e)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    if !config.ui.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let quiet = cli.quiet || !config.ui.progress;
    let output_ctx = OutputContext::from_cli(cli.format, quiet);

    commands::run(cli.into_command(), output_ctx, &config).await
}
