//! dupesweep - duplicate file finder
//!
//! Walks a directory tree, buckets files by size, fingerprints same-size
//! files with MD5, numbers every duplicate and deletes the ones you pick.

pub mod actions;
pub mod app;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod scanner;

use std::io;

use anyhow::Result;

use crate::app::{run_session, RunOptions};
use crate::cli::Cli;
use crate::config::Config;
use crate::error::ExitCode;
use crate::prompt::Prompter;

/// Run the application against the process's stdin and stdout.
///
/// # Errors
///
/// Returns an error if the configuration file named on the command line
/// can't be loaded, or if the session fails (see [`run_session`]).
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let config = match cli.config {
        Some(ref path) => Config::load_from(Some(path.as_path()))?,
        None => Config::load(),
    };
    let options = RunOptions::from_cli(&cli);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    run_session(&cli, &config, options, &mut prompter)
}
