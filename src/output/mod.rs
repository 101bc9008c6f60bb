//! Output formatters for listings and duplicate reports.
//!
//! - Text: the size listing, the numbered report and the freed-space line,
//!   written between prompts
//! - JSON: one document covering the whole run, for scripting
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::duplicates::{enumerate, DuplicateFinder};
//! use dupesweep::output::TextOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, _summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! let report = enumerate(&groups);
//! TextOutput::new(false)
//!     .write_report(&mut std::io::stdout(), &report)
//!     .unwrap();
//! ```

pub mod json;
pub mod text;

pub use json::{JsonDeletion, JsonOutput, JsonSizeBucket, JsonSummary};
pub use text::TextOutput;
