//! File actions module.
//!
//! # Deletion
//!
//! The delete module removes files selected by their enumerated number:
//! - Permanent deletion (default)
//! - Move to system trash (opt-in)
//! - Batch operations that skip invalid numbers and continue past failures
//!
//! ```no_run
//! use dupesweep::actions::delete::permanent_delete;
//! use std::path::Path;
//!
//! let freed = permanent_delete(Path::new("/path/to/duplicate.txt"));
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    delete_by_index, delete_file, delete_to_trash, permanent_delete, BatchDeleteResult,
    DeleteConfig, DeleteError, DeleteMode, DeleteResult,
};
