//! Duplicate finder: walk, bucket by size, group by fingerprint.
//!
//! # Overview
//!
//! The [`DuplicateFinder`] runs the detection pipeline:
//! 1. **Walk** - collect every regular file under the root
//! 2. **Bucket** - group files by exact size
//! 3. **Hash** - fingerprint members of multi-file buckets and group them
//!
//! Grouping by fingerprint keeps first-seen order: groups appear in the
//! order their first member was found, and members keep bucket order.
//! Enumeration relies on this to give the same numbers on every run.
//!
//! Hashing can run on a rayon pool (`io_threads > 1`). Results are
//! collected back in input order, so the output is identical to a
//! sequential run.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::groups::{group_by_size, DuplicateGroup, GroupingStats, SizeBuckets, SortOrder};
use crate::progress::ProgressCallback;
use crate::scanner::{FileEntry, Hash, HashError, Hasher, ScanError, Walker, WalkerConfig};

/// Configuration for the duplicate finder.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Walker configuration (extension filter, error policy)
    pub walker_config: WalkerConfig,
    /// Order in which size buckets are visited
    pub sort_order: SortOrder,
    /// Number of hashing threads; 0 or 1 hashes on the calling thread
    pub io_threads: usize,
    /// Optional progress callback for the hashing phase
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("walker_config", &self.walker_config)
            .field("sort_order", &self.sort_order)
            .field("io_threads", &self.io_threads)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl FinderConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the size ordering.
    #[must_use]
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    /// Set the number of hashing threads.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Result of the walk and size-bucketing phases.
#[derive(Debug, Default)]
pub struct SizeScan {
    /// Files grouped by size
    pub buckets: SizeBuckets,
    /// Bucketing statistics
    pub stats: GroupingStats,
    /// Walk errors that were skipped (only under the skip policy)
    pub skipped: Vec<ScanError>,
}

/// Result of the hashing phase.
#[derive(Debug, Default)]
pub struct GroupingOutcome {
    /// Duplicate groups in enumeration order
    pub groups: Vec<DuplicateGroup>,
    /// Files excluded because they couldn't be hashed
    pub hash_errors: Vec<HashError>,
    /// Number of files that were hashed successfully
    pub hashed_files: usize,
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Total number of files scanned
    pub total_files: usize,
    /// Total size of all scanned files in bytes
    pub total_size: u64,
    /// Number of files eliminated by size grouping (unique sizes)
    pub eliminated_by_size: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding one original per group)
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing duplicates
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Walk errors skipped during the scan
    pub scan_errors: Vec<ScanError>,
    /// Hashing failures; these files were excluded
    pub hash_errors: Vec<HashError>,
}

impl ScanSummary {
    /// Build a summary from the two phase results.
    ///
    /// The error lists start empty; callers move them in once they're done
    /// with the phase results.
    #[must_use]
    pub fn from_phases(stats: &GroupingStats, outcome: &GroupingOutcome, duration: Duration) -> Self {
        Self {
            total_files: stats.total_files,
            total_size: stats.total_size,
            eliminated_by_size: stats.eliminated_unique,
            duplicate_groups: outcome.groups.len(),
            duplicate_files: outcome.groups.iter().map(DuplicateGroup::duplicate_count).sum(),
            reclaimable_space: outcome.groups.iter().map(DuplicateGroup::wasted_space).sum(),
            scan_duration: duration,
            scan_errors: Vec::new(),
            hash_errors: Vec::new(),
        }
    }

    /// Whether any file was skipped because of an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.scan_errors.is_empty() || !self.hash_errors.is_empty()
    }

    /// Calculate the percentage of space that is wasted by duplicates.
    #[must_use]
    pub fn wasted_percentage(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            (self.reclaimable_space as f64 / self.total_size as f64) * 100.0
        }
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        bytesize::ByteSize::b(self.reclaimable_space).to_string()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The walk failed and the error policy is abort.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Duplicate finder that orchestrates the detection pipeline.
///
/// # Example
///
/// ```no_run
/// use dupesweep::duplicates::{DuplicateFinder, FinderConfig, SortOrder};
/// use std::path::Path;
///
/// let config = FinderConfig::default().with_sort_order(SortOrder::Descending);
/// let finder = DuplicateFinder::new(config);
///
/// let (groups, summary) = finder.find_duplicates(Path::new("/some/path")).unwrap();
///
/// println!("Found {} duplicate groups", summary.duplicate_groups);
/// println!("Reclaimable space: {}", summary.reclaimable_display());
/// ```
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
    pool: Option<rayon::ThreadPool>,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let pool = if config.io_threads > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(config.io_threads)
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    log::warn!("Failed to build hashing pool, hashing sequentially: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            config,
            hasher: Hasher::new(),
            pool,
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The configuration this finder was built with.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Walk `path` and bucket every qualifying file by size.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` / `NotADirectory` if the root is unusable
    /// - `Scan` for the first walk error under the abort policy
    pub fn scan(&self, path: &Path) -> Result<SizeScan, FinderError> {
        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }

        log::info!("Starting scan of {}", path.display());

        let walker = Walker::new(path, self.config.walker_config.clone());
        let (files, skipped) = walker.collect_files()?;
        let (buckets, stats) = group_by_size(files);

        Ok(SizeScan {
            buckets,
            stats,
            skipped,
        })
    }

    /// Hash the members of every multi-file bucket and group them.
    ///
    /// Buckets are visited in the configured size order. Files that fail
    /// to hash are logged, recorded and left out; the rest carry on.
    #[must_use]
    pub fn group_duplicates(&self, buckets: &SizeBuckets) -> GroupingOutcome {
        let candidates: usize = buckets
            .iter(self.config.sort_order)
            .filter(|(_, files)| files.len() > 1)
            .map(|(_, files)| files.len())
            .sum();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("hashing", candidates);
        }

        let mut outcome = GroupingOutcome::default();
        let mut processed = 0usize;

        for (size, files) in buckets.iter(self.config.sort_order) {
            if files.len() < 2 {
                continue;
            }

            let mut by_hash: Vec<(Hash, Vec<FileEntry>)> = Vec::new();
            let mut positions: HashMap<Hash, usize> = HashMap::new();

            for (file, result) in files.iter().zip(self.hash_bucket(files)) {
                processed += 1;
                if let Some(ref callback) = self.config.progress_callback {
                    callback.on_progress(processed, &file.path.to_string_lossy());
                    callback.on_item_completed(file.size);
                }

                match result {
                    Ok(hash) => {
                        outcome.hashed_files += 1;
                        match positions.entry(hash) {
                            Entry::Occupied(slot) => by_hash[*slot.get()].1.push(file.clone()),
                            Entry::Vacant(slot) => {
                                slot.insert(by_hash.len());
                                by_hash.push((hash, vec![file.clone()]));
                            }
                        }
                    }
                    Err(e) => {
                        log::warn!("Skipping {}: {}", file.path.display(), e);
                        outcome.hash_errors.push(e);
                    }
                }
            }

            for (hash, members) in by_hash {
                if members.len() > 1 {
                    log::debug!(
                        "Duplicate group {} bytes: {} files",
                        size,
                        members.len()
                    );
                    outcome.groups.push(DuplicateGroup::new(hash, size, members));
                }
            }
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("hashing");
        }

        log::info!(
            "Hashing complete: {} files hashed, {} duplicate groups, {} errors",
            outcome.hashed_files,
            outcome.groups.len(),
            outcome.hash_errors.len()
        );

        outcome
    }

    /// Run the full pipeline on `path`.
    ///
    /// # Errors
    ///
    /// See [`scan`](Self::scan). Hashing failures never fail the call; they
    /// are listed in [`ScanSummary::hash_errors`].
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let scan = self.scan(path)?;
        let mut outcome = self.group_duplicates(&scan.buckets);

        let mut summary = ScanSummary::from_phases(&scan.stats, &outcome, start_time.elapsed());
        summary.scan_errors = scan.skipped;
        summary.hash_errors = std::mem::take(&mut outcome.hash_errors);

        log::info!(
            "Scan complete: {} duplicate groups, {} reclaimable",
            summary.duplicate_groups,
            summary.reclaimable_display()
        );

        Ok((outcome.groups, summary))
    }

    /// Fingerprint a bucket's files, results in the same order as `files`.
    fn hash_bucket(&self, files: &[FileEntry]) -> Vec<Result<Hash, HashError>> {
        match &self.pool {
            Some(pool) => pool.install(|| {
                files
                    .par_iter()
                    .map(|f| f.fingerprint_with(&self.hasher))
                    .collect()
            }),
            None => files
                .iter()
                .map(|f| f.fingerprint_with(&self.hasher))
                .collect(),
        }
    }
}
