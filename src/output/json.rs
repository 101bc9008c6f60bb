//! JSON output formatter for a whole run.
//!
//! Provides machine-readable output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "size_buckets": [
//!     { "size": 12, "files": ["/dir/a.txt", "/dir/b.txt"] }
//!   ],
//!   "duplicates": [
//!     {
//!       "size": 12,
//!       "hash": "5d41402abc4b2a76b9719d911017c592",
//!       "files": [
//!         { "number": 1, "path": "/dir/a.txt" },
//!         { "number": 2, "path": "/dir/b.txt" }
//!       ]
//!     }
//!   ],
//!   "deletion": {
//!     "deleted": ["/dir/b.txt"],
//!     "failed": [],
//!     "ignored_numbers": [],
//!     "bytes_freed": 12
//!   },
//!   "summary": {
//!     "total_files": 2,
//!     "total_size": 24,
//!     "duplicate_groups": 1,
//!     "reclaimable_space": 12,
//!     "exit_code": 0,
//!     "exit_code_name": "DS000"
//!   }
//! }
//! ```
//!
//! `duplicates` is empty when the check was declined, and `deletion` is
//! `null` when nothing was requested.

use std::io::Write;

use serde::Serialize;

use crate::actions::BatchDeleteResult;
use crate::duplicates::{Enumeration, ReportGroup, ScanSummary, SizeBuckets, SortOrder};
use crate::error::ExitCode;

/// One size bucket of the listing.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSizeBucket {
    /// File size in bytes
    pub size: u64,
    /// Paths of every file with that size
    pub files: Vec<String>,
}

/// Outcome of the deletion step.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDeletion {
    /// Paths that were removed
    pub deleted: Vec<String>,
    /// Paths that couldn't be removed, with the reason
    pub failed: Vec<JsonFailure>,
    /// Requested numbers that matched no file
    pub ignored_numbers: Vec<i64>,
    /// Total bytes freed
    pub bytes_freed: u64,
}

/// A failed deletion.
#[derive(Debug, Clone, Serialize)]
pub struct JsonFailure {
    /// Path that was not removed
    pub path: String,
    /// Why it was not removed
    pub reason: String,
}

impl From<&BatchDeleteResult> for JsonDeletion {
    fn from(result: &BatchDeleteResult) -> Self {
        Self {
            deleted: result
                .successes
                .iter()
                .map(|s| s.path.to_string_lossy().into_owned())
                .collect(),
            failed: result
                .failures
                .iter()
                .map(|(path, reason)| JsonFailure {
                    path: path.to_string_lossy().into_owned(),
                    reason: reason.clone(),
                })
                .collect(),
            ignored_numbers: result.skipped.clone(),
            bytes_freed: result.bytes_freed,
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Total number of files that passed the filter
    pub total_files: usize,
    /// Total size of those files in bytes
    pub total_size: u64,
    /// Files ruled out because their size was unique
    pub eliminated_by_size: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Duplicate files, not counting one original per group
    pub duplicate_files: usize,
    /// Bytes that removing every extra copy would free
    pub reclaimable_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// Paths skipped during the walk
    pub skipped_paths: Vec<String>,
    /// Files left out because they couldn't be hashed
    pub hash_errors: Vec<String>,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DS000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a ScanSummary and an exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            total_files: summary.total_files,
            total_size: summary.total_size,
            eliminated_by_size: summary.eliminated_by_size,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            skipped_paths: summary.scan_errors.iter().map(ToString::to_string).collect(),
            hash_errors: summary.hash_errors.iter().map(ToString::to_string).collect(),
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Every size bucket, in the requested order
    pub size_buckets: Vec<JsonSizeBucket>,
    /// Numbered duplicate groups
    pub duplicates: Vec<ReportGroup>,
    /// What the deletion step did, if it ran
    pub deletion: Option<JsonDeletion>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the document from the phase results.
    #[must_use]
    pub fn new(
        buckets: &SizeBuckets,
        order: SortOrder,
        enumeration: &Enumeration,
        summary: &ScanSummary,
        exit_code: ExitCode,
    ) -> Self {
        Self {
            size_buckets: buckets
                .iter(order)
                .map(|(size, files)| JsonSizeBucket {
                    size,
                    files: files
                        .iter()
                        .map(|f| f.path.to_string_lossy().into_owned())
                        .collect(),
                })
                .collect(),
            duplicates: enumeration.report.clone(),
            deletion: None,
            summary: JsonSummary::from_scan_summary(summary, exit_code),
        }
    }

    /// Attach the deletion outcome.
    #[must_use]
    pub fn with_deletion(mut self, result: &BatchDeleteResult) -> Self {
        self.deletion = Some(JsonDeletion::from(result));
        self
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation")]
    Io(#[from] std::io::Error),
}
