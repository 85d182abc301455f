// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `RepowalkError` to add hints and to pick the
//! process exit status from the error kind.

use std::fmt::Write;
use std::process::ExitCode;

use anyhow::Error;
use repowalk_core::{ErrorKind, RepowalkError};

/// Formats an error for CLI display with helpful hints.
///
/// Errors that are not a `RepowalkError` are shown with their full context chain.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.downcast_ref::<RepowalkError>() else {
        return format!("{error:#}");
    };

    match err {
        RepowalkError::NotAuthenticated => "Authentication required - set GH_TOKEN or \
             GITHUB_TOKEN, add github.token to the config file, or run `gh auth login`"
            .to_string(),
        RepowalkError::Auth { .. } => {
            format!("{err}\n\nTip: Check the token with `repowalk auth status`.")
        }
        RepowalkError::RateLimited { .. } => {
            format!("{err}\n\nTip: Wait for the reset time or raise github.max_rate_limit_wait_seconds.")
        }
        RepowalkError::Transient { .. } => {
            format!("{err}\n\nTip: Check your internet connection and try again.")
        }
        RepowalkError::Config { .. } => format!(
            "{err}\n\nTip: Check your config file at {}",
            repowalk_core::config_file_path().display()
        ),
        RepowalkError::GitHub {
            status: Some(404), ..
        } => format!("{err}\n\nTip: Check the organization name and that your token can see it."),
        RepowalkError::Aggregation { source, .. } => {
            let mut msg = err.to_string();
            let _ = write!(msg, "\n  Caused by: {source}");
            msg.push_str("\n\nTip: No partial results were kept. Run the command again.");
            msg
        }
        RepowalkError::Export { source, .. } => format!("{err}: {source}"),
        RepowalkError::InvalidExport { source, .. } => format!("{err}: {source}"),
        _ => err.to_string(),
    }
}

/// Exit status for an error.
///
/// 2 configuration, 3 authentication, 4 rate limited, 5 transient failure,
/// 6 interrupted aggregation, 1 anything else.
pub fn exit_status(error: &Error) -> u8 {
    let Some(err) = error.downcast_ref::<RepowalkError>() else {
        return 1;
    };
    match err.kind() {
        ErrorKind::Configuration => 2,
        ErrorKind::Auth => 3,
        ErrorKind::RateLimited => 4,
        ErrorKind::Transient => 5,
        ErrorKind::Aggregation => 6,
        ErrorKind::Other => 1,
    }
}

/// [`exit_status`] as a process exit code.
pub fn exit_code(error: &Error) -> ExitCode {
    ExitCode::from(exit_status(error))
}
