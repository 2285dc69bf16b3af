//! Validation source strategies.
//!
//! Only the filesystem strategy (`fs` module) exists, behind the concrete
//! `validate_fs()` public API.

use std::path::PathBuf;

use crate::error::ScanError;

pub mod fs;

/// One discovery step, in walk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovered {
    /// A file selected for validation.
    File(PathBuf),
    /// A path the walk could not get past. Reported in place.
    Failed(ScanError),
}
