// SPDX-License-Identifier: Apache-2.0

//! Interactive organization selection.

use std::io::IsTerminal;

use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use repowalk_core::{
    NoPromptSelector, OrgSelector, OrganizationSummary, RepowalkError, Result, Scope,
};

const PERSONAL_ENTRY: &str = "Personal repositories";

/// Asks on the terminal which organization to rank.
///
/// The first entry stands for personal repositories; Esc picks it too.
pub struct TerminalOrgSelector;

impl OrgSelector for TerminalOrgSelector {
    fn select(&self, organizations: &[OrganizationSummary]) -> Result<Scope> {
        let items = menu_items(organizations);
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Which repositories should be ranked?")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| RepowalkError::config(format!("selection prompt failed: {e}")))?;
        Ok(scope_for_choice(organizations, choice))
    }
}

/// Picks the terminal prompt when both stdin and stderr are terminals.
pub fn selector_for_terminal() -> Box<dyn OrgSelector> {
    if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
        Box::new(TerminalOrgSelector)
    } else {
        Box::new(NoPromptSelector)
    }
}

fn menu_items(organizations: &[OrganizationSummary]) -> Vec<String> {
    std::iter::once(PERSONAL_ENTRY.to_string())
        .chain(organizations.iter().map(|org| match &org.description {
            Some(description) => format!("{} - {description}", org.name),
            None => org.name.clone(),
        }))
        .collect()
}

fn scope_for_choice(organizations: &[OrganizationSummary], choice: Option<usize>) -> Scope {
    match choice {
        Some(index) if index > 0 => organizations
            .get(index - 1)
            .map_or(Scope::Personal, |org| Scope::Organization(org.name.clone())),
        _ => Scope::Personal,
    }
}
