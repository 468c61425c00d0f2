pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod locator;
pub mod packages;
pub mod parsers;
pub mod process;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;

/// Run mpm CLI entrypoint.
pub fn run_cli() {
    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
