//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Deterministic directory walking using walkdir
//! - Extension filtering
//! - Content fingerprinting with MD5
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: MD5 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::scanner::{ExtensionFilter, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     extension: ExtensionFilter::new("txt"),
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("."), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

// Re-export main types
pub use hasher::{hash_to_hex, Hash, Hasher, BUFFER_SIZE};
pub use walker::Walker;

/// Metadata for a discovered file.
///
/// The fingerprint starts out empty and is filled in the first time the
/// file is hashed; later lookups reuse the cached value.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path to the file, as produced by the walk
    pub path: PathBuf,
    /// File size in bytes at scan time
    pub size: u64,
    fingerprint: OnceLock<Hash>,
}

impl FileEntry {
    /// Create a new FileEntry without a fingerprint.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size` - File size in bytes
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            fingerprint: OnceLock::new(),
        }
    }

    /// The cached fingerprint, if this file has been hashed.
    #[must_use]
    pub fn fingerprint(&self) -> Option<&Hash> {
        self.fingerprint.get()
    }

    /// Hash the file with `hasher` unless a fingerprint is already cached.
    ///
    /// # Errors
    ///
    /// Returns the [`HashError`] from the hasher. Nothing is cached on failure.
    pub fn fingerprint_with(&self, hasher: &Hasher) -> Result<Hash, HashError> {
        if let Some(hash) = self.fingerprint.get() {
            return Ok(*hash);
        }
        let hash = hasher.fingerprint(&self.path)?;
        Ok(*self.fingerprint.get_or_init(|| hash))
    }
}

/// Extension filter applied during the walk.
///
/// An empty filter matches every file. Otherwise the filter holds a dotted
/// extension such as `.txt` and is compared case-sensitively against
/// [`dotted_extension`] of each path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ExtensionFilter(Option<String>);

impl ExtensionFilter {
    /// Build a filter from user input. `txt` and `.txt` are equivalent;
    /// empty or whitespace-only input matches everything.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self(None)
        } else if trimmed.starts_with('.') {
            Self(Some(trimmed.to_string()))
        } else {
            Self(Some(format!(".{trimmed}")))
        }
    }

    /// A filter that matches every file.
    #[must_use]
    pub fn any() -> Self {
        Self(None)
    }

    /// The dotted extension this filter requires, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether this filter matches every file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Check a path against the filter.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        match &self.0 {
            None => true,
            Some(ext) => dotted_extension(path) == Some(ext.as_str()),
        }
    }
}

impl From<String> for ExtensionFilter {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<ExtensionFilter> for String {
    fn from(filter: ExtensionFilter) -> Self {
        filter.0.unwrap_or_default()
    }
}

/// Extension of the final path component, including its leading dot.
///
/// The extension starts at the last `.` of the file name, so
/// `archive.tar.gz` gives `.gz` and `.bashrc` gives `.bashrc`.
/// Returns `None` when the name has no dot or is not valid UTF-8.
#[must_use]
pub fn dotted_extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|idx| &name[idx..])
}

/// What the walker does when a directory or metadata read fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkErrorPolicy {
    /// Stop the walk and report the first error.
    #[default]
    Abort,
    /// Log the error, remember it, and keep walking.
    Skip,
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Only include files with this extension.
    pub extension: ExtensionFilter,

    /// Behavior on unreadable paths.
    pub on_error: WalkErrorPolicy,
}

impl WalkerConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    ///
    /// * `extension` - Extension filter
    /// * `on_error` - Walk error policy
    #[must_use]
    pub fn new(extension: ExtensionFilter, on_error: WalkErrorPolicy) -> Self {
        Self {
            extension,
            on_error,
        }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error for a path.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error for a path.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// The path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}
