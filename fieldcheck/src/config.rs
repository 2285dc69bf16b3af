//! Configuration types for document validation.
//!
//! Split into core validation config (what a valid document looks like) and
//! source-specific config (where documents come from). The core API does not
//! leak filesystem concerns.

use std::path::PathBuf;

use crate::schema::{FrontMatterSchema, LogSchema};

/// Which kind of document a run validates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentKind {
    /// Markdown with a `---` delimited YAML header (prompt files).
    #[default]
    FrontMatter,
    /// Whole-file JSON object keyed by a discriminant (log files).
    JsonLog,
}

impl DocumentKind {
    /// Conventional scan root for this kind.
    #[must_use]
    pub fn default_root(self) -> PathBuf {
        match self {
            Self::FrontMatter => PathBuf::from("./prompts"),
            Self::JsonLog => PathBuf::from("./logs"),
        }
    }

    /// File name suffix selected during discovery.
    #[must_use]
    pub fn default_extension(self) -> &'static str {
        match self {
            Self::FrontMatter => ".md",
            Self::JsonLog => ".json",
        }
    }
}

/// Core validation config. Applies regardless of input source.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ValidationConfig {
    /// Parser and schema selection.
    pub kind: DocumentKind,
    /// Required header fields for [`DocumentKind::FrontMatter`].
    pub front_matter: FrontMatterSchema,
    /// Rule table for [`DocumentKind::JsonLog`].
    pub log_schema: LogSchema,
}

impl ValidationConfig {
    /// Default schemas for the given kind.
    #[must_use]
    pub fn for_kind(kind: DocumentKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

/// Filesystem-specific source options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Directory (or single file) to scan. Must exist.
    pub root: PathBuf,
    /// Files are selected when their name ends with this suffix (e.g. `.md`).
    pub extension: String,
    /// Exclude patterns (glob format), matched against the path and the file name.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links while walking (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self::for_kind(DocumentKind::default())
    }
}

impl FsSourceConfig {
    /// Conventional root and extension for the given kind, default limits.
    #[must_use]
    pub fn for_kind(kind: DocumentKind) -> Self {
        Self {
            root: kind.default_root(),
            extension: kind.default_extension().to_owned(),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }

    /// Accepts `md` as well as `.md`.
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = if extension.starts_with('.') {
            extension.to_owned()
        } else {
            format!(".{extension}")
        };
        self
    }
}
