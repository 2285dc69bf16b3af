//! # fieldcheck
//!
//! Required-field validation for Markdown front matter and JSON log files.
//!
//! The crate separates the **core validation engine** (content in, outcome
//! out; see [`validate_document`]) from the **input strategy** (filesystem
//! walking; see [`validate_fs`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fieldcheck::{validate_fs, DocumentKind, FsSourceConfig, ValidationConfig};
//!
//! let fs_config = FsSourceConfig::for_kind(DocumentKind::JsonLog);
//! let validation_config = ValidationConfig::for_kind(DocumentKind::JsonLog);
//!
//! let report = validate_fs(&fs_config, &validation_config).unwrap();
//! for file in &report.files {
//!     println!("{}", file.format_line());
//! }
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod error;
mod format;
pub mod output;
mod report;
pub mod schema;
mod strategy;
mod validator;

pub use config::{DocumentKind, FsSourceConfig, ValidationConfig};
pub use error::{Finding, Outcome, ScanError, ScanErrorKind};
pub use report::{FileReport, ValidationReport};
pub use schema::{FrontMatterSchema, LogSchema};
pub use validator::validate_document;

use tracing::{debug, info};

use strategy::Discovered;
use strategy::fs::{find_files, read_file_bounded};

/// Validate every matching file under `fs_config.root`.
///
/// # Errors
///
/// Returns an error if `fs_config.root` is empty or does not exist.
/// Per-file failures (unreadable files, parse errors, missing fields) never
/// abort the run; each becomes one entry in `report.files`.
pub fn validate_fs(
    fs_config: &FsSourceConfig,
    validation_config: &ValidationConfig,
) -> anyhow::Result<ValidationReport> {
    validate_fs_with(fs_config, validation_config, |_| Ok(()))
}

/// Like [`validate_fs`], but hands each file's result to `on_file` as soon as
/// that file is done, before the next file is read.
///
/// # Errors
///
/// Returns an error if `fs_config.root` is empty or does not exist, or if
/// `on_file` fails. An `on_file` error stops the run.
pub fn validate_fs_with<F>(
    fs_config: &FsSourceConfig,
    validation_config: &ValidationConfig,
    mut on_file: F,
) -> anyhow::Result<ValidationReport>
where
    F: FnMut(&FileReport) -> anyhow::Result<()>,
{
    if fs_config.root.as_os_str().is_empty() {
        anyhow::bail!("No root path provided for validation");
    }
    if !fs_config.root.exists() {
        anyhow::bail!("Path does not exist: {}", fs_config.root.display());
    }

    let mut report = ValidationReport::default();

    for discovered in find_files(fs_config) {
        let file_report = match discovered {
            Discovered::Failed(scan_err) => {
                FileReport::new(scan_err.file.clone(), Finding::Unreadable(scan_err).into())
            }
            Discovered::File(path) => {
                let outcome = match read_file_bounded(&path, fs_config.max_file_size) {
                    Ok(content) => {
                        report.scanned_files += 1;
                        validate_document(&content, validation_config)
                    }
                    Err(scan_err) => Finding::Unreadable(scan_err).into(),
                };
                FileReport::new(path, outcome)
            }
        };

        debug!(path = %file_report.path.display(), status = %file_report.outcome, "validated");
        if let Outcome::Invalid(Finding::HeaderParseError(detail)) = &file_report.outcome {
            debug!(path = %file_report.path.display(), %detail, "front matter did not decode");
        }
        if !file_report.outcome.is_valid() {
            report.failed_files += 1;
        }
        on_file(&file_report)?;
        report.files.push(file_report);
    }

    report.ok = report.failed_files == 0;
    info!(
        root = %fs_config.root.display(),
        files = report.files_attempted(),
        scanned = report.scanned_files,
        failed = report.failed_files,
        "validation finished"
    );
    Ok(report)
}
