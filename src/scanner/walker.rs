//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting file metadata for duplicate detection.
//!
//! # Features
//!
//! - Single-threaded traversal with children sorted by file name, so the
//!   order of discovered files is the same on every run
//! - Regular files only (directories and symlinks are never entries)
//! - Extension filtering via [`ExtensionFilter`](super::ExtensionFilter)
//! - Abort-on-first-error by default, or skip-and-continue
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! let (files, skipped) = walker.collect_files().unwrap();
//! println!("{} files, {} unreadable paths skipped", files.len(), skipped.len());
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError, WalkErrorPolicy, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// The root this walker starts from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Errors are yielded as [`ScanError`] values in traversal order; this
    /// iterator never stops on its own. [`collect_files`](Self::collect_files)
    /// applies the configured error policy.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        if entry.file_type().is_symlink() {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                        }
                        return None;
                    }

                    if !self.config.extension.matches(entry.path()) {
                        log::trace!(
                            "Skipping file due to extension filter: {}",
                            entry.path().display()
                        );
                        return None;
                    }

                    match entry.metadata() {
                        Ok(metadata) => Some(Ok(FileEntry::new(
                            entry.into_path(),
                            metadata.len(),
                        ))),
                        Err(e) => Some(Err(self.handle_walk_error(e))),
                    }
                }
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Walk the tree and collect every qualifying file.
    ///
    /// With [`WalkErrorPolicy::Abort`] the first error ends the walk and is
    /// returned. With [`WalkErrorPolicy::Skip`] errors are collected and
    /// returned alongside the files.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`] under the abort policy.
    pub fn collect_files(&self) -> Result<(Vec<FileEntry>, Vec<ScanError>), ScanError> {
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        for result in self.walk() {
            match result {
                Ok(file) => files.push(file),
                Err(e) => match self.config.on_error {
                    WalkErrorPolicy::Abort => {
                        log::error!("Walk aborted: {}", e);
                        return Err(e);
                    }
                    WalkErrorPolicy::Skip => skipped.push(e),
                },
            }
        }

        log::debug!(
            "Walked {}: {} files, {} errors skipped",
            self.root.display(),
            files.len(),
            skipped.len()
        );
        Ok((files, skipped))
    }

    /// Convert a walkdir error into a [`ScanError`] with its path.
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);

        match error.into_io_error() {
            Some(io) => ScanError::from_io(&path, io),
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop detected"),
            },
        }
    }
}
