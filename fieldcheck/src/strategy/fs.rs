//! Filesystem validation source.
//!
//! Discovers files on disk and reads them for the validation pipeline.
//! Properties enforced here:
//! - Directory entries are visited in file-name order, so repeated runs agree
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths are checked to remain within the scan root
//! - Device files, pipes, and sockets are skipped
//! - Maximum directory depth is enforced to prevent infinite recursion
//! - Bounded reads prevent memory `DoS` on oversized files

use std::io::Read;
use std::path::Path;

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::FsSourceConfig;
use crate::error::{ScanError, ScanErrorKind};
use crate::strategy::Discovered;

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Check if the file name ends with the configured suffix.
fn matches_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(extension))
}

#[cfg(unix)]
fn is_special_file(entry: &walkdir::DirEntry) -> bool {
    use std::os::unix::fs::FileTypeExt;
    entry.metadata().map(|m| m.file_type()).is_ok_and(|ft| {
        ft.is_block_device() || ft.is_char_device() || ft.is_fifo() || ft.is_socket()
    })
}

#[cfg(not(unix))]
fn is_special_file(_entry: &walkdir::DirEntry) -> bool {
    false
}

/// Walk `config.root` and list what to validate, in discovery order.
///
/// Walk errors (permission denied, loop, etc.), invalid exclude patterns and
/// boundary violations come back as [`Discovered::Failed`] at the position
/// they were hit. They never stop the walk.
pub fn find_files(config: &FsSourceConfig) -> Vec<Discovered> {
    let mut found = Vec::new();

    let mut exclude_patterns = Vec::with_capacity(config.exclude.len());
    for pat_str in &config.exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => exclude_patterns.push(pat),
            Err(e) => {
                warn!(pattern = %pat_str, error = %e, "invalid exclude pattern");
                found.push(Discovered::Failed(ScanError::new(
                    pat_str.as_str(),
                    ScanErrorKind::InvalidExcludePattern,
                    format!("Invalid exclude glob pattern '{pat_str}': {e}"),
                )));
            }
        }
    }

    let root = &config.root;

    // Canonicalize the root once so we can enforce the boundary for every entry.
    let canonical_root = match root.canonicalize() {
        Ok(r) => r,
        Err(e) => {
            found.push(Discovered::Failed(ScanError::new(
                root.as_path(),
                ScanErrorKind::IoError,
                format!("Failed to canonicalize root path: {e}"),
            )));
            return found;
        }
    };

    if root.is_file() {
        if matches_extension(root, &config.extension) && !matches_exclude(root, &exclude_patterns)
        {
            found.push(Discovered::File(root.clone()));
        }
        return found;
    }

    for entry_result in WalkDir::new(root)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .sort_by_file_name()
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| root.clone(), Path::to_path_buf);
                warn!(path = %path.display(), error = %walk_err, "directory traversal error");
                found.push(Discovered::Failed(ScanError::new(
                    path,
                    ScanErrorKind::WalkError,
                    format!("Directory traversal error: {walk_err}"),
                )));
                continue;
            }
        };

        let file_path = entry.path();

        if !file_path.is_file() || is_special_file(&entry) {
            continue;
        }

        if !matches_extension(file_path, &config.extension) {
            continue;
        }

        if matches_exclude(file_path, &exclude_patterns) {
            debug!(path = %file_path.display(), "excluded");
            continue;
        }

        // A symlinked file may point anywhere; only accept targets under the root.
        match file_path.canonicalize() {
            Ok(canonical_path) if !canonical_path.starts_with(&canonical_root) => {
                found.push(Discovered::Failed(ScanError::new(
                    file_path,
                    ScanErrorKind::OutsideRoot,
                    format!(
                        "Path resolves outside scan root: {} -> {}",
                        file_path.display(),
                        canonical_path.display()
                    ),
                )));
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                found.push(Discovered::Failed(ScanError::new(
                    file_path,
                    ScanErrorKind::IoError,
                    format!("Failed to canonicalize path: {e}"),
                )));
                continue;
            }
        }

        found.push(Discovered::File(file_path.to_path_buf()));
    }

    found
}

/// Read a file using a bounded read, enforcing `max_file_size`.
///
/// The handle is dropped before this returns, so parsing never holds it open.
///
/// # Errors
///
/// Returns a `ScanError` if:
/// - The file exceeds `max_file_size`
/// - An I/O error occurs
/// - The content is not valid UTF-8
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScanError::new(
            path,
            ScanErrorKind::IoError,
            format!("Failed to read file: {e}"),
        )
    })?;

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            ScanError::new(
                path,
                ScanErrorKind::IoError,
                format!("Failed to read file: {e}"),
            )
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(ScanError::new(
            path,
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|_| {
        ScanError::new(
            path,
            ScanErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        )
    })
}
