//! Size bucketing and duplicate group types.
//!
//! # Overview
//!
//! Size grouping is the first phase of duplicate detection: files with
//! different sizes can never be duplicates, so every file is placed in a
//! bucket keyed by its exact byte length. Buckets are kept in an ordered
//! map and each bucket keeps the order in which the walk found its files,
//! which makes every later listing deterministic.
//!
//! # Example
//!
//! ```
//! use dupesweep::scanner::FileEntry;
//! use dupesweep::duplicates::{group_by_size, SortOrder};
//! use std::path::PathBuf;
//!
//! let files = vec![
//!     FileEntry::new(PathBuf::from("/file1.txt"), 1024),
//!     FileEntry::new(PathBuf::from("/file2.txt"), 1024),
//!     FileEntry::new(PathBuf::from("/file3.txt"), 2048),
//! ];
//!
//! let (buckets, stats) = group_by_size(files);
//!
//! assert_eq!(stats.total_files, 3);
//! assert_eq!(stats.potential_duplicates, 2);
//! assert_eq!(buckets.len(), 2);
//! assert_eq!(buckets.sizes(SortOrder::Descending), vec![2048, 1024]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scanner::{hash_to_hex, FileEntry, Hash};

/// Ordering of size buckets in listings and enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest size first.
    #[default]
    Ascending,
    /// Largest size first.
    Descending,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

/// Files grouped by exact byte size.
///
/// Sizes are unique keys. Within a bucket, files stay in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SizeBuckets {
    buckets: BTreeMap<u64, Vec<FileEntry>>,
}

impl SizeBuckets {
    /// Create an empty bucket collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file to the bucket for its size.
    pub fn insert(&mut self, file: FileEntry) {
        self.buckets.entry(file.size).or_default().push(file);
    }

    /// Number of distinct sizes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if no files were bucketed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of files across all buckets.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Files of exactly `size` bytes, in traversal order.
    #[must_use]
    pub fn get(&self, size: u64) -> Option<&[FileEntry]> {
        self.buckets.get(&size).map(Vec::as_slice)
    }

    /// Bucket sizes in the requested order.
    #[must_use]
    pub fn sizes(&self, order: SortOrder) -> Vec<u64> {
        self.iter(order).map(|(size, _)| size).collect()
    }

    /// Iterate `(size, files)` pairs in the requested order.
    pub fn iter(&self, order: SortOrder) -> Box<dyn Iterator<Item = (u64, &[FileEntry])> + '_> {
        let iter = self
            .buckets
            .iter()
            .map(|(size, files)| (*size, files.as_slice()));
        match order {
            SortOrder::Ascending => Box::new(iter),
            SortOrder::Descending => Box::new(iter.rev()),
        }
    }
}

impl FromIterator<FileEntry> for SizeBuckets {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        let mut buckets = Self::new();
        for file in iter {
            buckets.insert(file);
        }
        buckets
    }
}

/// Confirmed duplicate group of files.
///
/// All files share `size` and `hash`, and there are always at least two.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// MD5 fingerprint shared by every file
    pub hash: Hash,
    /// File size in bytes
    pub size: u64,
    /// Member files, in bucket order
    pub files: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    ///
    /// # Arguments
    ///
    /// * `hash` - Content fingerprint
    /// * `size` - File size in bytes
    /// * `files` - Member files
    #[must_use]
    pub fn new(hash: Hash, size: u64, files: Vec<FileEntry>) -> Self {
        Self { hash, size, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total wasted space (all copies minus one).
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }
}

/// Statistics from the size grouping phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of files processed
    pub total_files: usize,
    /// Total size of all files in bytes
    pub total_size: u64,
    /// Number of unique file sizes
    pub unique_sizes: usize,
    /// Number of files in buckets of 2+ (these get hashed)
    pub potential_duplicates: usize,
    /// Number of files alone in their bucket
    pub eliminated_unique: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated by size grouping.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Group files by size.
///
/// Every file lands in the bucket for its exact size, singleton buckets
/// included; the size listing shows all of them. Hashing later skips the
/// singletons.
///
/// # Example
///
/// ```
/// use dupesweep::scanner::FileEntry;
/// use dupesweep::duplicates::group_by_size;
/// use std::path::PathBuf;
///
/// let files = vec![
///     FileEntry::new(PathBuf::from("/a.txt"), 100),
///     FileEntry::new(PathBuf::from("/b.txt"), 100),
///     FileEntry::new(PathBuf::from("/c.txt"), 200),
/// ];
///
/// let (buckets, stats) = group_by_size(files);
///
/// assert_eq!(buckets.get(100).unwrap().len(), 2);
/// assert_eq!(stats.eliminated_unique, 1);
/// ```
#[must_use]
pub fn group_by_size(files: impl IntoIterator<Item = FileEntry>) -> (SizeBuckets, GroupingStats) {
    let mut stats = GroupingStats::default();
    let mut buckets = SizeBuckets::new();

    for file in files {
        stats.total_files += 1;
        stats.total_size += file.size;
        buckets.insert(file);
    }

    stats.unique_sizes = buckets.len();
    for (size, files) in buckets.iter(SortOrder::Ascending) {
        if files.len() == 1 {
            stats.eliminated_unique += 1;
            log::trace!("Unique size {}: {}", size, files[0].path.display());
        } else {
            stats.potential_duplicates += files.len();
            log::debug!("Size bucket {} bytes: {} candidates", size, files.len());
        }
    }

    log::info!(
        "Size grouping complete: {} files → {} candidates ({:.1}% eliminated)",
        stats.total_files,
        stats.potential_duplicates,
        stats.elimination_rate()
    );

    (buckets, stats)
}
