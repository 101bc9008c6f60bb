//! One dupesweep run, from the first question to the freed-space total.
//!
//! Each setting is resolved in order: explicit flag, then the interactive
//! prompt (interactive runs only), then the configuration. The core is
//! handed plain values and never sees the CLI.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::actions::{delete_by_index, BatchDeleteResult, DeleteConfig, DeleteMode};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{
    enumerate, DuplicateFinder, FinderConfig, GroupingOutcome, ScanSummary, SortOrder,
};
use crate::error::ExitCode;
use crate::output::{JsonOutput, TextOutput};
use crate::progress::Progress;
use crate::prompt::Prompter;
use crate::scanner::{ExtensionFilter, WalkErrorPolicy, WalkerConfig};

/// How a run talks to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Ask for anything the flags left open.
    pub interactive: bool,
    /// Color the text listings.
    pub color: bool,
    /// Draw a hashing progress bar on stderr.
    pub progress: bool,
}

impl RunOptions {
    /// Derive the options from the flags and the attached terminals.
    ///
    /// JSON output never prompts, so stdout holds a single document.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let text = cli.output == OutputFormat::Text;
        Self {
            interactive: text && !cli.non_interactive,
            color: text && !cli.no_color && io::stdout().is_terminal(),
            progress: !cli.quiet && io::stderr().is_terminal(),
        }
    }

    /// Plain, non-interactive options with no progress bar.
    #[must_use]
    pub fn batch() -> Self {
        Self {
            interactive: false,
            color: false,
            progress: false,
        }
    }
}

/// Run a whole session against `prompter`.
///
/// Prompts, listings and the report all go to the prompter's writer; logs
/// and the progress bar go to stderr.
///
/// # Errors
///
/// Fails if the root can't be scanned, if the walk aborts, or if a prompt
/// can't be answered (including end of input). Hashing and deletion
/// failures don't fail the run; they turn the exit code into
/// [`ExitCode::PartialSuccess`].
pub fn run_session<R: BufRead, W: Write>(
    cli: &Cli,
    config: &Config,
    options: RunOptions,
    prompter: &mut Prompter<R, W>,
) -> Result<ExitCode> {
    let extension = match &cli.extension {
        Some(raw) => ExtensionFilter::new(raw),
        None if options.interactive => prompter.ask_extension()?,
        None => config.extension.clone(),
    };
    let sort_order: SortOrder = match cli.sort {
        Some(sort) => sort.into(),
        None if options.interactive => prompter.ask_sort_order()?,
        None => config.sort_order,
    };
    let on_error = if cli.skip_errors {
        WalkErrorPolicy::Skip
    } else {
        config.walk_errors
    };
    let delete_config = DeleteConfig {
        mode: if cli.trash {
            DeleteMode::Trash
        } else {
            config.delete_mode
        },
    };

    let mut finder_config = FinderConfig::default()
        .with_walker_config(WalkerConfig::new(extension, on_error))
        .with_sort_order(sort_order)
        .with_io_threads(cli.io_threads.unwrap_or(config.io_threads).max(1));
    if options.progress {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }
    let finder = DuplicateFinder::new(finder_config);
    log::debug!("Finder config: {:?}", finder.config());

    let started = Instant::now();
    let scan = finder
        .scan(&cli.path)
        .with_context(|| format!("Failed to scan {}", cli.path.display()))?;

    let text = TextOutput::new(options.color);
    if cli.output == OutputFormat::Text {
        text.write_size_listing(prompter.output(), &scan.buckets, sort_order)?;
    }

    let check = match cli.check {
        Some(answer) => answer.into(),
        None if cli.yes => true,
        None if options.interactive => prompter.ask_yes_no("Check for duplicates?")?,
        None => true,
    };

    let mut outcome = if check {
        finder.group_duplicates(&scan.buckets)
    } else {
        log::info!("Duplicate check skipped");
        GroupingOutcome::default()
    };
    let enumeration = enumerate(&outcome.groups);

    let mut summary = ScanSummary::from_phases(&scan.stats, &outcome, started.elapsed());
    summary.scan_errors = scan.skipped;
    summary.hash_errors = std::mem::take(&mut outcome.hash_errors);

    if check && cli.output == OutputFormat::Text {
        text.write_report(prompter.output(), &enumeration)?;
    }

    let numbers = match &cli.delete {
        Some(numbers) => Some(numbers.clone()),
        None if options.interactive && !enumeration.index.is_empty() => {
            if cli.yes || prompter.ask_yes_no("Delete files?")? {
                Some(prompter.ask_numbers()?)
            } else {
                None
            }
        }
        None => None,
    };
    let deletion = numbers.map(|numbers| delete_by_index(&enumeration.index, &numbers, &delete_config));

    let exit_code = exit_code_for(check, &summary, enumeration.index.is_empty(), deletion.as_ref());

    match cli.output {
        OutputFormat::Text => {
            if let Some(ref result) = deletion {
                text.write_deletion(prompter.output(), result)?;
            }
        }
        OutputFormat::Json => {
            let mut output =
                JsonOutput::new(&scan.buckets, sort_order, &enumeration, &summary, exit_code);
            if let Some(ref result) = deletion {
                output = output.with_deletion(result);
            }
            output.write_to(prompter.output(), true)?;
        }
    }
    prompter.output().flush()?;

    log::info!(
        "Run complete: {} groups, {} reclaimable ({:.1}% of scanned bytes), exit code {}",
        summary.duplicate_groups,
        summary.reclaimable_display(),
        summary.wasted_percentage(),
        exit_code.as_i32()
    );

    Ok(exit_code)
}

fn exit_code_for(
    checked: bool,
    summary: &ScanSummary,
    no_duplicates: bool,
    deletion: Option<&BatchDeleteResult>,
) -> ExitCode {
    if summary.has_errors() || deletion.is_some_and(|r| r.failure_count() > 0) {
        ExitCode::PartialSuccess
    } else if checked && no_duplicates {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    }
}
