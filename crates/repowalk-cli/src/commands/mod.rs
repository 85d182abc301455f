// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the repowalk CLI.

pub mod auth;
pub mod completion;
pub mod list;
pub mod types;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use repowalk_core::AppConfig;

use crate::cli::{AuthCommand, Commands, CompletionCommand, OutputContext};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if !ctx.is_interactive() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

/// Dispatch to the appropriate command handler.
pub async fn run(command: Commands, ctx: OutputContext, config: &AppConfig) -> Result<()> {
    match command {
        Commands::List(args) => list::run(&args, &ctx, config).await,

        Commands::Auth(AuthCommand::Status) => {
            let result = auth::run_status(config).await?;
            output::render(&result, &ctx)
        }

        Commands::Completion(CompletionCommand::Generate { shell }) => {
            completion::run_generate(shell)
        }
    }
}
