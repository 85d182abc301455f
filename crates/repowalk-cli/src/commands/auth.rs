// SPDX-License-Identifier: Apache-2.0

//! Authentication status command.

use anyhow::Result;
use repowalk_core::auth::TokenProvider;
use repowalk_core::{AppConfig, RepowalkError, authenticated_login};
use tracing::debug;

use super::types::AuthStatusResult;
use crate::provider::CliTokenProvider;

/// Reports which token is used and which login GitHub maps it to.
///
/// A missing token is reported as "not authenticated"; a token GitHub
/// rejects is an error.
pub async fn run_status(config: &AppConfig) -> Result<AuthStatusResult> {
    let provider = CliTokenProvider::new(&config.github);
    let method = provider.token_source();

    match authenticated_login(&provider, config).await {
        Ok(login) => Ok(AuthStatusResult {
            authenticated: true,
            method,
            username: Some(login),
        }),
        Err(RepowalkError::NotAuthenticated) => {
            debug!("No token available");
            Ok(AuthStatusResult {
                authenticated: false,
                method: None,
                username: None,
            })
        }
        Err(e) => Err(e.into()),
    }
}
