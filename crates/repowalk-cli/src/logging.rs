// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the repowalk CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging to stderr.
//! The `RUST_LOG` environment variable overrides the default filter.
//!
//! # Examples
//!
//! ```bash
//! # Default: warnings (retries, rate limit waits, ignored flags)
//! repowalk --all
//!
//! # Debug output for troubleshooting
//! RUST_LOG=repowalk=debug repowalk --all
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "repowalk=warn,octocrab=error";
const VERBOSE_FILTER: &str = "repowalk=debug,octocrab=warn";

/// Returns the filter directives used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Initialize the logging subsystem.
///
/// `verbose` (`-v`) raises repowalk's own targets to debug level.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
