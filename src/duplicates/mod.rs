//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based file grouping
//! - Fingerprint grouping within size buckets
//! - Stable numbering of duplicate files for selection

pub mod finder;
pub mod groups;
pub mod index;

pub use finder::{
    DuplicateFinder, FinderConfig, FinderError, GroupingOutcome, ScanSummary, SizeScan,
};
pub use groups::{group_by_size, DuplicateGroup, GroupingStats, SizeBuckets, SortOrder};
pub use index::{enumerate, Enumeration, FileIndex, NumberedFile, ReportGroup};
