//! Shared output formatting for validation reports.
//!
//! Provides JSON and line formatters for `ValidationReport`. Terminal
//! concerns (exit status, log verbosity) belong to the CLI layer.

use std::io::Write;

use crate::report::{FileReport, ValidationReport};

/// Write one `<path>: <status>` line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_line(file: &FileReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer, "{}", file.format_line())?;
    Ok(())
}

/// Write every report entry as a `<path>: <status>` line, in discovery order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_lines(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    for file in &report.files {
        write_line(file, writer)?;
    }
    Ok(())
}

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}
