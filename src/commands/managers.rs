//! `managers`: what is registered for this host and what was found

use super::{Context, print_json};
use crate::core::ManagerState;
use crate::error::Result;
use crate::packages::Manager;
use crate::ui as output;
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ManagerInfo<'m> {
    id: &'m str,
    name: &'m str,
    state: ManagerState,
    cli_path: Option<String>,
    version: Option<String>,
    requirement: &'m str,
    meets_requirement: Option<bool>,
}

impl<'m> ManagerInfo<'m> {
    fn inspect(manager: &'m Manager) -> Self {
        let cli_path = manager.cli_path().map(|p| p.display().to_string());
        let (version, meets_requirement) = if cli_path.is_some() {
            match manager.get_version() {
                Ok(version) => (Some(version.to_string()), manager.meets_requirement().ok()),
                Err(e) => {
                    output::debug(&format!("{}: cannot read version: {}", manager.name(), e));
                    (None, None)
                }
            }
        } else {
            (None, None)
        };

        Self {
            id: manager.id(),
            name: manager.name(),
            state: manager.state(),
            cli_path,
            version,
            requirement: manager.requirement(),
            meets_requirement,
        }
    }
}

pub fn run(ctx: &Context) -> Result<()> {
    let infos: Vec<ManagerInfo> = ctx.managers.par_iter().map(ManagerInfo::inspect).collect();

    if ctx.json {
        return print_json(&infos);
    }

    output::header("Package managers");
    for info in &infos {
        let status = match info.state {
            ManagerState::Available => "✓".green(),
            _ => "✗".red(),
        };
        let version = match (&info.version, info.meets_requirement) {
            (Some(v), Some(false)) => format!("{} (requires {})", v, info.requirement)
                .yellow()
                .to_string(),
            (Some(v), _) => v.clone(),
            (None, _) => "-".dimmed().to_string(),
        };
        let path = info.cli_path.as_deref().unwrap_or("CLI not found");

        output::indent(
            &format!("{} {:<6} {:<16} {:<10} {}", status, info.id, info.name, version, path),
            1,
        );
    }

    Ok(())
}
