//! Stable numbering of duplicate files.
//!
//! # Overview
//!
//! Every file that belongs to a duplicate group gets a number, starting at
//! 1, in exactly the order the finder produced the groups: size order, then
//! group order, then member order. The resulting [`FileIndex`] is what the
//! deleter consults, so a number the user read off the report always refers
//! to the same file within a run.
//!
//! # Example
//!
//! ```
//! use dupesweep::duplicates::{enumerate, DuplicateGroup};
//! use dupesweep::scanner::FileEntry;
//! use std::path::{Path, PathBuf};
//!
//! let group = DuplicateGroup::new(
//!     [0u8; 16],
//!     1,
//!     vec![
//!         FileEntry::new(PathBuf::from("a.txt"), 1),
//!         FileEntry::new(PathBuf::from("b.txt"), 1),
//!     ],
//! );
//!
//! let enumeration = enumerate(&[group]);
//! assert_eq!(enumeration.index.len(), 2);
//! assert_eq!(enumeration.index.get(2).unwrap().path, PathBuf::from("b.txt"));
//! assert!(enumeration.index.get(0).is_none());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use super::groups::DuplicateGroup;
use crate::scanner::FileEntry;

/// Number → file table for one run.
///
/// Numbers are contiguous from 1 to [`len`](Self::len) and cover exactly
/// the files that appear in some duplicate group.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    entries: Vec<FileEntry>,
}

impl FileIndex {
    /// Number of enumerated files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no files were enumerated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a file by its number.
    ///
    /// Returns `None` for 0, negative numbers, and numbers past the end.
    #[must_use]
    pub fn get(&self, number: i64) -> Option<&FileEntry> {
        if number < 1 {
            return None;
        }
        let position = usize::try_from(number - 1).ok()?;
        self.entries.get(position)
    }

    /// Check whether `number` refers to a file.
    #[must_use]
    pub fn contains(&self, number: i64) -> bool {
        self.get(number).is_some()
    }

    /// Iterate `(number, file)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &FileEntry)> {
        (1usize..).zip(self.entries.iter())
    }
}

/// One numbered member of a duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedFile {
    /// 1-based number used to select the file for deletion
    pub number: usize,
    /// Path to the file, serialized lossily so non-UTF-8 names still report
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// A duplicate group as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportGroup {
    /// Shared file size in bytes
    pub size: u64,
    /// Shared fingerprint, lowercase hex
    pub hash: String,
    /// Numbered members
    pub files: Vec<NumberedFile>,
}

/// The numbered report plus the table used to resolve numbers.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    /// Number → file table, consumed by the deleter
    pub index: FileIndex,
    /// Groups with their numbered members, for display
    pub report: Vec<ReportGroup>,
}

impl Enumeration {
    /// Render the plain-text report.
    ///
    /// Calling this repeatedly yields the same text; nothing is renumbered.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.report {
            writeln!(f, "{} bytes", group.size)?;
            writeln!(f, "Hash: {}", group.hash)?;
            for file in &group.files {
                writeln!(f, "{}. {}", file.number, file.path.display())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Number every file across `groups`, in the order given.
#[must_use]
pub fn enumerate(groups: &[DuplicateGroup]) -> Enumeration {
    let numbered = groups
        .iter()
        .enumerate()
        .flat_map(|(g, group)| group.files.iter().map(move |file| (g, file)))
        .zip(1usize..);

    let mut report: Vec<ReportGroup> = groups
        .iter()
        .map(|group| ReportGroup {
            size: group.size,
            hash: group.hash_hex(),
            files: Vec::with_capacity(group.files.len()),
        })
        .collect();
    let mut entries = Vec::with_capacity(groups.iter().map(DuplicateGroup::len).sum());

    for ((g, file), number) in numbered {
        report[g].files.push(NumberedFile {
            number,
            path: file.path.clone(),
        });
        entries.push(file.clone());
    }

    log::debug!("Enumerated {} files in {} groups", entries.len(), report.len());

    Enumeration {
        index: FileIndex { entries },
        report,
    }
}
