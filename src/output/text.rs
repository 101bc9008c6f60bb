//! Plain-text listings written between the interactive prompts.
//!
//! The uncolored output is stable and line-oriented:
//!
//! ```text
//! 12 bytes
//! /dir/a.txt
//! /dir/b.txt
//!
//! 12 bytes
//! Hash: 5d41402abc4b2a76b9719d911017c592
//! 1. /dir/a.txt
//! 2. /dir/b.txt
//!
//! Total freed up space: 12 bytes
//! ```

use std::io::{self, Write};

use yansi::Paint;

use crate::actions::BatchDeleteResult;
use crate::duplicates::{Enumeration, SizeBuckets, SortOrder};

/// Writer for the text listings, optionally colored with yansi.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOutput {
    color: bool,
}

impl TextOutput {
    /// Create a text formatter. With `color` off the output is plain ASCII
    /// apart from the paths themselves.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Write every size bucket (singletons included) in `order`.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_size_listing<W: Write>(
        &self,
        writer: &mut W,
        buckets: &SizeBuckets,
        order: SortOrder,
    ) -> io::Result<()> {
        writeln!(writer)?;
        for (size, files) in buckets.iter(order) {
            writeln!(writer, "{}", self.size_header(size))?;
            for file in files {
                writeln!(writer, "{}", file.path.display())?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Write the numbered duplicate report.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_report<W: Write>(
        &self,
        writer: &mut W,
        enumeration: &Enumeration,
    ) -> io::Result<()> {
        if !self.color {
            return write!(writer, "\n{enumeration}");
        }

        writeln!(writer)?;
        for group in &enumeration.report {
            writeln!(writer, "{}", self.size_header(group.size))?;
            writeln!(writer, "Hash: {}", group.hash.cyan())?;
            for file in &group.files {
                writeln!(
                    writer,
                    "{} {}",
                    format!("{}.", file.number).yellow(),
                    file.path.display()
                )?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Write the outcome of a deletion: one line per failure, then the total.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_deletion<W: Write>(
        &self,
        writer: &mut W,
        result: &BatchDeleteResult,
    ) -> io::Result<()> {
        for (path, reason) in &result.failures {
            let line = format!("Could not delete {}: {}", path.display(), reason);
            if self.color {
                writeln!(writer, "{}", line.red())?;
            } else {
                writeln!(writer, "{line}")?;
            }
        }
        self.write_freed(writer, result.bytes_freed)
    }

    /// Write the `Total freed up space` line.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_freed<W: Write>(&self, writer: &mut W, bytes: u64) -> io::Result<()> {
        let amount = format!("{bytes} bytes");
        if self.color {
            writeln!(writer, "\nTotal freed up space: {}", amount.bold().green())
        } else {
            writeln!(writer, "\nTotal freed up space: {amount}")
        }
    }

    fn size_header(&self, size: u64) -> String {
        let header = format!("{size} bytes");
        if self.color {
            header.bold().to_string()
        } else {
            header
        }
    }
}
