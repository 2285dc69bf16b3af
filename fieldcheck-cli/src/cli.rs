use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use fieldcheck::{DocumentKind, FsSourceConfig, LogSchema, ValidationConfig, output};
use tracing::info;

use crate::logging;

/// Check prompt front matter and JSON logs for required fields.
#[derive(Parser, Debug)]
#[command(name = "fieldcheck", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate YAML front matter of Markdown prompts (default root ./prompts).
    Prompts(ScanArgs),
    /// Validate required keys of JSON logs (default root ./logs).
    Logs(LogsArgs),
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory (or single file) to scan.
    pub root: Option<PathBuf>,

    /// File name suffix to select (default: .md for prompts, .json for logs).
    #[arg(long)]
    pub ext: Option<String>,

    /// Glob pattern of paths to skip. Repeatable.
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Maximum file size in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Follow symbolic links while walking.
    #[arg(long)]
    pub follow_links: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    pub format: OutputFormat,

    /// Exit with status 1 if any file fails validation.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// YAML or JSON rule table replacing the built-in trade/behavior rules.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `<path>: <status>` line per file.
    Lines,
    /// The whole report as JSON.
    Json,
}

/// Whether the run should make the process fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Passed,
    Failed,
}

/// Parse arguments, run the selected validator and print its report.
///
/// Per-file failures only affect the status under `--strict`.
pub fn run() -> anyhow::Result<RunStatus> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let (kind, scan, schema) = match cli.command {
        Commands::Prompts(scan) => (DocumentKind::FrontMatter, scan, None),
        Commands::Logs(args) => (DocumentKind::JsonLog, args.scan, args.schema),
    };

    let fs_config = build_fs_config(kind, &scan);
    let mut validation_config = ValidationConfig::for_kind(kind);
    if let Some(path) = schema {
        validation_config.log_schema = LogSchema::load(&path)?;
        info!(schema = %path.display(), "loaded log schema");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = match scan.format {
        OutputFormat::Lines => fieldcheck::validate_fs_with(&fs_config, &validation_config, |file| {
            output::write_line(file, &mut out)
        })?,
        OutputFormat::Json => {
            let report = fieldcheck::validate_fs(&fs_config, &validation_config)?;
            output::write_json(&report, &mut out)?;
            report
        }
    };
    out.flush()?;

    if scan.strict && !report.ok {
        return Ok(RunStatus::Failed);
    }
    Ok(RunStatus::Passed)
}

fn build_fs_config(kind: DocumentKind, scan: &ScanArgs) -> FsSourceConfig {
    let mut fs_config = FsSourceConfig::for_kind(kind);
    if let Some(ext) = &scan.ext {
        fs_config = fs_config.with_extension(ext);
    }
    if let Some(root) = &scan.root {
        fs_config.root.clone_from(root);
    }
    fs_config.exclude.clone_from(&scan.exclude);
    if let Some(max) = scan.max_file_size {
        fs_config.max_file_size = max;
    }
    fs_config.follow_links = scan.follow_links;
    fs_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_per_subcommand() {
        let cli = Cli::try_parse_from(["fieldcheck", "prompts"]).unwrap();
        let Commands::Prompts(scan) = cli.command else {
            panic!("expected prompts subcommand");
        };
        let cfg = build_fs_config(DocumentKind::FrontMatter, &scan);
        assert_eq!(cfg.root, PathBuf::from("./prompts"));
        assert_eq!(cfg.extension, ".md");
        assert_eq!(scan.format, OutputFormat::Lines);
        assert!(!scan.strict);

        let cli = Cli::try_parse_from(["fieldcheck", "logs"]).unwrap();
        let Commands::Logs(args) = cli.command else {
            panic!("expected logs subcommand");
        };
        let cfg = build_fs_config(DocumentKind::JsonLog, &args.scan);
        assert_eq!(cfg.root, PathBuf::from("./logs"));
        assert_eq!(cfg.extension, ".json");
        assert!(args.schema.is_none());
    }

    #[test]
    fn test_overrides_are_applied() {
        let cli = Cli::try_parse_from([
            "fieldcheck",
            "-vv",
            "logs",
            "data/journal",
            "--ext",
            "log.json",
            "--exclude",
            "*/tmp/*",
            "--exclude",
            "draft*",
            "--max-file-size",
            "512",
            "--follow-links",
            "--format",
            "json",
            "--strict",
            "--schema",
            "rules.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Logs(args) = cli.command else {
            panic!("expected logs subcommand");
        };
        let cfg = build_fs_config(DocumentKind::JsonLog, &args.scan);
        assert_eq!(cfg.root, PathBuf::from("data/journal"));
        assert_eq!(cfg.extension, ".log.json");
        assert_eq!(cfg.exclude, vec!["*/tmp/*".to_owned(), "draft*".to_owned()]);
        assert_eq!(cfg.max_file_size, 512);
        assert!(cfg.follow_links);
        assert_eq!(args.scan.format, OutputFormat::Json);
        assert!(args.scan.strict);
        assert_eq!(args.schema, Some(PathBuf::from("rules.yaml")));
    }

    #[test]
    fn test_schema_flag_only_on_logs() {
        assert!(Cli::try_parse_from(["fieldcheck", "prompts", "--schema", "x.yaml"]).is_err());
    }
}
