//! File deletion by enumerated number.
//!
//! # Overview
//!
//! This module removes files the user picked from the numbered report:
//! - Permanent deletion (default)
//! - Move to system trash (opt-in, recoverable)
//! - Batch operations that never stop on a single failure
//!
//! The size credited to the freed total is read immediately before each
//! removal, not taken from the scan, so files that changed since the
//! listing are accounted at their current size.
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::actions::delete::{delete_by_index, DeleteConfig};
//! use dupesweep::duplicates::{enumerate, DuplicateFinder};
//! use std::path::Path;
//!
//! let (groups, _) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("."))
//!     .unwrap();
//! let enumeration = enumerate(&groups);
//!
//! let result = delete_by_index(&enumeration.index, &[1, 3], &DeleteConfig::default());
//! println!("{}", result.summary());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duplicates::FileIndex;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Classify an I/O error for a path.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }
}

/// How files are removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Unlink the file; it cannot be recovered.
    #[default]
    Permanent,
    /// Move the file to the platform trash.
    Trash,
}

/// Configuration for deletion operations.
#[derive(Debug, Clone, Default)]
pub struct DeleteConfig {
    /// Removal mode.
    pub mode: DeleteMode,
}

impl DeleteConfig {
    /// Create config for trash deletion.
    #[must_use]
    pub fn trash() -> Self {
        Self {
            mode: DeleteMode::Trash,
        }
    }

    /// Create config for permanent deletion.
    #[must_use]
    pub fn permanent() -> Self {
        Self {
            mode: DeleteMode::Permanent,
        }
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Number the file was selected by.
    pub number: i64,
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the file in bytes, read just before deletion.
    pub size: u64,
}

/// Results of a batch deletion.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Failed deletions with their reasons.
    pub failures: Vec<(PathBuf, String)>,
    /// Requested numbers that didn't refer to any file.
    pub skipped: Vec<i64>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if every attempted deletion succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!("Deleted {} file(s)", self.success_count());
        if !self.all_succeeded() {
            summary.push_str(&format!(", {} failed", self.failure_count()));
        }
        if !self.skipped.is_empty() {
            summary.push_str(&format!(", {} invalid number(s) ignored", self.skipped.len()));
        }
        summary.push_str(&format!(", freed {} bytes", self.bytes_freed));
        summary
    }
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if the stat or removal is not allowed
/// - `Io` for other failures
pub fn permanent_delete(path: &Path) -> Result<u64, DeleteError> {
    let size = current_size(path)?;

    fs::remove_file(path).map_err(|e| {
        log::error!("Delete failed for {}: {}", path.display(), e);
        DeleteError::from_io(path, e)
    })?;

    log::info!("Deleted: {} ({} bytes)", path.display(), size);
    Ok(size)
}

/// Move a single file to the system trash.
///
/// # Errors
///
/// - `NotFound` / `PermissionDenied` / `Io` if the file can't be stat'ed
/// - `TrashFailed` if the trash operation fails
pub fn delete_to_trash(path: &Path) -> Result<u64, DeleteError> {
    let size = current_size(path)?;

    trash::delete(path).map_err(|e| {
        log::error!("Trash operation failed for {}: {}", path.display(), e);
        DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Moved to trash: {} ({} bytes)", path.display(), size);
    Ok(size)
}

/// Delete one file with the configured mode, returning the bytes freed.
///
/// # Errors
///
/// See [`permanent_delete`] and [`delete_to_trash`].
pub fn delete_file(path: &Path, config: &DeleteConfig) -> Result<u64, DeleteError> {
    match config.mode {
        DeleteMode::Permanent => permanent_delete(path),
        DeleteMode::Trash => delete_to_trash(path),
    }
}

/// Delete the files behind `numbers`, in the order requested.
///
/// Numbers outside `1..=index.len()` are skipped with a warning. Stat or
/// removal failures are recorded and the batch moves on to the next number.
#[must_use]
pub fn delete_by_index(
    index: &FileIndex,
    numbers: &[i64],
    config: &DeleteConfig,
) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    for &number in numbers {
        let Some(entry) = index.get(number) else {
            log::warn!(
                "Ignoring file number {} (valid range is 1..={})",
                number,
                index.len()
            );
            result.skipped.push(number);
            continue;
        };

        match delete_file(&entry.path, config) {
            Ok(size) => {
                result.bytes_freed += size;
                result.successes.push(DeleteResult {
                    number,
                    path: entry.path.clone(),
                    size,
                });
            }
            Err(e) => {
                log::warn!("Failed to delete {}: {}", entry.path.display(), e);
                result.failures.push((entry.path.clone(), e.to_string()));
            }
        }
    }

    log::info!("{}", result.summary());
    result
}

/// Read a file's size right now.
fn current_size(path: &Path) -> Result<u64, DeleteError> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| DeleteError::from_io(path, e))
}
