//! `installed` and `outdated` listings

use super::{Context, fan_out, print_json, settle};
use crate::core::{Package, PackageMap};
use crate::error::Result;
use crate::packages::Manager;
use crate::ui as output;
use colored::Colorize;
use std::collections::BTreeMap;

pub fn installed(ctx: &Context) -> Result<()> {
    render(ctx, "installed", Manager::installed)
}

pub fn outdated(ctx: &Context) -> Result<()> {
    render(ctx, "outdated", Manager::outdated)
}

fn render<F>(ctx: &Context, label: &str, op: F) -> Result<()>
where
    F: for<'m> Fn(&'m Manager) -> Result<&'m PackageMap> + Sync,
{
    let settled = settle(fan_out(&ctx.managers, |manager| op(manager)));

    if ctx.json {
        let by_manager: BTreeMap<&str, &PackageMap> = settled
            .done
            .iter()
            .map(|(manager, packages)| (manager.id(), *packages))
            .collect();
        print_json(&by_manager)?;
        return settled.finish();
    }

    for (manager, packages) in &settled.done {
        output::header(&format!(
            "{} ({} {})",
            manager.name(),
            packages.len(),
            label
        ));
        for package in packages.values() {
            output::indent(&row(package), 1);
        }
    }

    settled.finish()
}

fn row(package: &Package) -> String {
    let installed = package
        .installed_version
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "?".to_string());

    match &package.latest_version {
        Some(latest) => format!(
            "{} {} -> {}",
            package.name,
            installed.dimmed(),
            latest.to_string().green()
        ),
        None => format!("{} {}", package.name, installed.dimmed()),
    }
}
