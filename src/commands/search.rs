//! Package search command

use super::{Context, fan_out, print_json, settle};
use crate::core::PackageMap;
use crate::error::Result;
use crate::ui as output;
use colored::Colorize;
use std::collections::BTreeMap;

pub fn run(ctx: &Context, query: &str, exact: bool) -> Result<()> {
    let results = fan_out(&ctx.managers, |manager| {
        let mut found = manager.search(query)?;
        if exact {
            found.retain(|_, package| package.exact == Some(true));
        }
        Ok(found)
    });
    let settled = settle(results);

    if ctx.json {
        let by_manager: BTreeMap<&str, &PackageMap> = settled
            .done
            .iter()
            .map(|(manager, packages)| (manager.id(), packages))
            .collect();
        print_json(&by_manager)?;
        return settled.finish();
    }

    let total: usize = settled.done.iter().map(|(_, found)| found.len()).sum();
    if total == 0 {
        output::info(&format!("No packages found for '{}'", query));
        return settled.finish();
    }

    for (manager, found) in &settled.done {
        if found.is_empty() {
            continue;
        }
        output::header(&format!("{} ({} found)", manager.name(), found.len()));
        for package in found.values() {
            let version = package
                .latest_version
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default();
            let name = if package.exact == Some(true) {
                package.name.bold().to_string()
            } else {
                package.name.clone()
            };
            output::indent(&format!("{} {}", name, version.green()), 1);
        }
    }

    settled.finish()
}
