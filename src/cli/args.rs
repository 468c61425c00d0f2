use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mpm",
    about = "Meta package manager",
    long_about = "One interface over the package managers installed on this host (gem, pip, ...)",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Settings file to use instead of the per-user one
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Restrict to a manager id (repeatable)
    #[arg(short = 'm', long = "manager", value_name = "ID", global = true)]
    pub managers: Vec<String>,

    /// Render results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List known managers with their availability
    Managers,

    /// List installed packages
    Installed,

    /// List packages with a newer release available
    Outdated,

    /// Search remote package indexes
    Search {
        query: String,

        /// Only keep results whose id matches the query exactly
        #[arg(long)]
        exact: bool,
    },

    /// Print the command upgrading a package, or everything
    Upgrade {
        /// Package id; omit to upgrade everything the manager allows
        package: Option<String>,
    },

    /// Run each manager's own cleanup routine
    Cleanup,
}
