//! Command dispatcher
//!
//! Routes CLI commands to their handlers.

use crate::cli::args::{Cli, Command};
use crate::commands::{self, Context};
use crate::config::Settings;
use crate::error::Result;
use crate::ui as output;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    let settings = Settings::load(args.global.config.as_deref())?;
    if settings.verbose && !args.global.quiet {
        output::set_verbose(true);
    }

    let ctx = Context::new(&settings, &args.global.managers, args.global.json)?;

    match &args.command {
        Command::Managers => commands::managers::run(&ctx),
        Command::Installed => commands::list::installed(&ctx),
        Command::Outdated => commands::list::outdated(&ctx),
        Command::Search { query, exact } => commands::search::run(&ctx, query, *exact),
        Command::Upgrade { package } => commands::upgrade::run(&ctx, package.as_deref()),
        Command::Cleanup => commands::cleanup::run(&ctx),
    }
}
