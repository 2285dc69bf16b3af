//! Error types for document validation.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// The kind of scan-level failure that prevented a file from being validated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The resolved path is outside the scan root (symlink escape).
    OutsideRoot,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A scan-level error: a path that could not be read at all.
///
/// These are distinct from the parse and schema findings of a file that was
/// read successfully. They still end up as one report line for the path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    /// The path that could not be scanned.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: ScanErrorKind, message: String) -> Self {
        Self {
            file: file.into(),
            kind,
            message,
        }
    }
}

/// Why a single file failed validation.
///
/// The `Display` output is the status text printed after `<path>: ` in the
/// line report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Finding {
    /// The content does not open with a `---` delimited header block.
    #[error("Missing front matter")]
    MissingHeaderBlock,
    /// The header block exists but does not decode to a YAML mapping, either
    /// because the YAML is malformed or because it is not a mapping. Carries
    /// the detail.
    #[error("YAML parse error")]
    HeaderParseError(String),
    /// First required front-matter field that is absent.
    #[error("Missing {0}")]
    MissingRequiredField(String),
    /// Every absent log field, in schema order.
    #[error("MISSING [{}]", quote_fields(.0))]
    MissingRequiredFields(Vec<String>),
    /// The document body could not be decoded.
    #[error("ERROR: {0}")]
    DocumentParseError(String),
    /// The file could not be read or reached.
    #[error("ERROR: {}", .0.message)]
    Unreadable(ScanError),
}

/// Render field names as a bracket-free, quoted, comma separated list:
/// `'date', 'size'`.
fn quote_fields(fields: &[String]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('\'');
        for c in field.chars() {
            if c == '\'' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('\'');
    }
    out
}

/// Result of validating one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every required field is present.
    Valid,
    /// Parsing or schema validation failed.
    Invalid(Finding),
}

impl Outcome {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Status text as it appears in the line report.
    #[must_use]
    pub fn status(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => f.write_str("OK"),
            Self::Invalid(finding) => write!(f, "{finding}"),
        }
    }
}

impl From<Finding> for Outcome {
    fn from(finding: Finding) -> Self {
        Self::Invalid(finding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_for_each_finding() {
        assert_eq!(Outcome::Valid.status(), "OK");
        assert_eq!(
            Outcome::from(Finding::MissingHeaderBlock).status(),
            "Missing front matter"
        );
        assert_eq!(
            Outcome::from(Finding::HeaderParseError("mapping values".to_owned())).status(),
            "YAML parse error"
        );
        assert_eq!(
            Outcome::from(Finding::MissingRequiredField("version".to_owned())).status(),
            "Missing version"
        );
        assert_eq!(
            Outcome::from(Finding::DocumentParseError(
                "expected value at line 1 column 1".to_owned()
            ))
            .status(),
            "ERROR: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_missing_fields_list_is_quoted_in_order() {
        let finding =
            Finding::MissingRequiredFields(vec!["date".to_owned(), "size".to_owned()]);
        assert_eq!(finding.to_string(), "MISSING ['date', 'size']");

        let single = Finding::MissingRequiredFields(vec!["rationale".to_owned()]);
        assert_eq!(single.to_string(), "MISSING ['rationale']");
    }

    #[test]
    fn test_quotes_inside_field_names_are_escaped() {
        let finding = Finding::MissingRequiredFields(vec!["it's".to_owned()]);
        assert_eq!(finding.to_string(), r"MISSING ['it\'s']");
    }

    #[test]
    fn test_unreadable_uses_scan_message() {
        let err = ScanError::new(
            "logs/big.json",
            ScanErrorKind::FileTooLarge,
            "File exceeds maximum size of 10 bytes".to_owned(),
        );
        let outcome = Outcome::from(Finding::Unreadable(err));
        assert!(!outcome.is_valid());
        assert_eq!(
            outcome.status(),
            "ERROR: File exceeds maximum size of 10 bytes"
        );
    }
}
