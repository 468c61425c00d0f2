//! `upgrade`: print, never run, each manager's upgrade command line

use super::{Context, fan_out, print_json, settle};
use crate::error::{MpmError, Result};
use crate::ui as output;
use std::collections::BTreeMap;

pub fn run(ctx: &Context, package: Option<&str>) -> Result<()> {
    let settled = settle(fan_out(&ctx.managers, |manager| {
        manager.upgrade_cli(package)
    }));

    if ctx.json {
        let by_manager: BTreeMap<&str, &Vec<String>> = settled
            .done
            .iter()
            .map(|(manager, argv)| (manager.id(), argv))
            .collect();
        print_json(&by_manager)?;
        return settled.finish();
    }

    for (manager, argv) in &settled.done {
        output::debug(&format!("{} upgrade command", manager.name()));
        println!("{}", shell_line(argv)?);
    }

    settled.finish()
}

/// Quote `argv` so it can be pasted into a POSIX shell
pub fn shell_line(argv: &[String]) -> Result<String> {
    shlex::try_join(argv.iter().map(String::as_str))
        .map_err(|e| MpmError::Other(format!("Cannot quote command line: {}", e)))
}
