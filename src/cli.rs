//! Command-line interface definitions for dupesweep.
//!
//! Every option that is left out is either asked for interactively or
//! taken from the configuration file, depending on whether the run is
//! interactive.
//!
//! # Example
//!
//! ```bash
//! # Interactive: prompts for format, sort order and deletions
//! dupesweep ~/Downloads
//!
//! # Scripted: all .jpg duplicates, largest first, as JSON
//! dupesweep ~/Pictures -e jpg -s desc --output json
//!
//! # Delete files 2 and 4 from the numbered report without prompting
//! dupesweep ~/Downloads --non-interactive --delete 2,4
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::duplicates::SortOrder;

/// Find duplicate files by size and content, and delete them by number.
#[derive(Debug, Parser)]
#[command(name = "dupesweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Directory to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Only consider files with this extension (e.g. `txt` or `.txt`)
    ///
    /// Compared case-sensitively against the text after the last dot of
    /// the file name. Pass an empty string to consider all files.
    #[arg(short, long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Size ordering of the listings
    #[arg(short, long, value_enum, value_name = "ORDER")]
    pub sort: Option<SortArg>,

    /// Whether to hash same-size files and report duplicates
    #[arg(long, value_enum, value_name = "ANSWER")]
    pub check: Option<Answer>,

    /// File numbers from the duplicate report to delete
    ///
    /// Comma-separated, and may be repeated (`--delete 2,4 --delete 7`).
    /// Numbers that don't appear in the report are ignored.
    #[arg(
        long,
        value_name = "N",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub delete: Option<Vec<i64>>,

    /// Move deleted files to the trash instead of removing them
    #[arg(long)]
    pub trash: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Number of threads used for hashing (1 = sequential)
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Skip unreadable paths instead of aborting the scan
    #[arg(long)]
    pub skip_errors: bool,

    /// Answer yes to the check and delete confirmations
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Never prompt; use flags, then configuration, then defaults
    #[arg(long)]
    pub non_interactive: bool,

    /// Configuration file to use instead of the platform default
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Size ordering accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Smallest first
    #[value(alias = "ascending")]
    Asc,
    /// Largest first
    #[value(alias = "descending")]
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortOrder::Ascending,
            SortArg::Desc => SortOrder::Descending,
        }
    }
}

/// A yes/no answer given as a flag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Answer {
    /// Yes
    Yes,
    /// No
    No,
}

impl From<Answer> for bool {
    fn from(answer: Answer) -> Self {
        answer == Answer::Yes
    }
}

/// Output format for listings and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text listings with interactive prompts
    Text,
    /// A single JSON document (implies --non-interactive)
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
