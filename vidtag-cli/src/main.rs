// vidtag-cli/src/main.rs
//
// Entry point for the `vidtag` binary.
//
// Responsibilities include:
// - Parsing arguments (clap exits with code 2 on argument errors).
// - Setting up logging.
// - Running a preview or apply pass through `run_rename`.
// - Mapping run-level errors to exit code 1.

use clap::Parser;
use console::style;
use std::process;
use vidtag_cli::error::{describe, exit_code};
use vidtag_cli::{Cli, logging, run_rename};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = run_rename(&cli).map(|_| ());
    if let Err(e) = &result {
        log::debug!("Run aborted: {:?}", e);
        eprintln!("{} {}", style("Error:").red().bold(), describe(e));
    }

    process::exit(exit_code(&result));
}
