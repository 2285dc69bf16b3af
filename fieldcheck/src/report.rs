//! Validation report types.

use std::path::PathBuf;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::Outcome;

/// One line of the report: a discovered path and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl FileReport {
    #[must_use]
    pub fn new(path: PathBuf, outcome: Outcome) -> Self {
        Self { path, outcome }
    }

    /// `<path>: <status>`
    #[must_use]
    pub fn format_line(&self) -> String {
        format!("{}: {}", self.path.display(), self.outcome)
    }
}

impl Serialize for FileReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FileReport", 3)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("status", &self.outcome.status())?;
        state.serialize_field("ok", &self.outcome.is_valid())?;
        state.end()
    }
}

/// Result of a validation run.
///
/// `files` is in discovery order and holds exactly one entry per discovered
/// path, including paths that could not be read.
#[derive(Debug, Clone, Default, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Number of files read and parsed (whatever the verdict).
    pub scanned_files: usize,
    /// Number of entries whose outcome is not `OK`.
    pub failed_files: usize,
    /// Whether every entry is `OK`.
    pub ok: bool,
    pub files: Vec<FileReport>,
}

impl ValidationReport {
    /// Total number of report entries.
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.files.len()
    }
}
