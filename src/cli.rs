use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Args, Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "extract-polygon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert a Polygon-style test archive into a JSON array of tests")]
#[command(
    long_about = "Reads a zip archive, pairs every entry under tests/ with the entry of the \
                  same name plus \".a\", and prints [{\"input\", \"answer\"}, ...] to stdout. \
                  Inputs without an answer entry are skipped."
)]
#[command(after_help = "EXAMPLES:\n  \
    extract-polygon problem-7.zip > tests.json\n  \
    extract-polygon package.zip --pretty --output tests.json\n  \
    extract-polygon package.zip --dry-run -v")]
pub struct ArchiveCli {
    /// Path to the zip archive
    #[arg(required_unless_present = "generate_config")]
    pub archive: Option<PathBuf>,

    /// Entry name prefix of the test directory
    #[arg(long, help = "Entry prefix marking test files (default: tests/)")]
    pub prefix: Option<String>,

    /// Suffix appended to an input entry to name its answer
    #[arg(long, help = "Suffix naming the answer entry (default: .a)")]
    pub answer_suffix: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(name = "extract-dir")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert a directory of .in/.ans files into a JSON array of tests")]
#[command(
    long_about = "Reads every NAME.in file at the top level of a directory together with its \
                  NAME.ans sibling, and prints [{\"input\", \"answer\"}, ...] to stdout. \
                  A missing .ans file is an error."
)]
#[command(after_help = "EXAMPLES:\n  \
    extract-dir ./tests > tests.json\n  \
    extract-dir ./data --input-ext txt --answer-ext out")]
pub struct DirectoryCli {
    /// Directory holding the test files
    #[arg(required_unless_present = "generate_config")]
    pub directory: Option<PathBuf>,

    /// Extension of input files
    #[arg(long, help = "Input file extension without the dot (default: in)")]
    pub input_ext: Option<String>,

    /// Extension of answer files
    #[arg(long, help = "Answer file extension without the dot (default: ans)")]
    pub answer_ext: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by both extractors.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Write JSON to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Style of the diagnostics printed to stderr
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// List the pairs that would be extracted without reading them
    #[arg(long)]
    pub dry_run: bool,

    /// Write a sample configuration file and exit
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, ValueEnum)]
pub enum MessageFormat {
    /// Colored, human-readable messages
    #[default]
    Human,
    /// Plain prefixed lines, suited to logs
    Plain,
}

impl CommonArgs {
    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub fn config_path_or_default(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from("casepack.toml"))
    }
}

/// What a binary needs from its parsed arguments.
pub trait ExtractorArgs {
    fn source_path(&self) -> Option<&Path>;
    fn common(&self) -> &CommonArgs;
    fn create_cli_overrides(&self) -> CliOverrides;

    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.common().config.as_ref())?;

        config.merge_with_cli_args(&self.create_cli_overrides());
        config.validate()?;

        Ok(config)
    }
}

impl ExtractorArgs for ArchiveCli {
    fn source_path(&self) -> Option<&Path> {
        self.archive.as_deref()
    }

    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_test_prefix(self.prefix.clone())
            .with_answer_suffix(self.answer_suffix.clone())
            .with_pretty(self.common.pretty)
    }
}

impl ExtractorArgs for DirectoryCli {
    fn source_path(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_input_extension(self.input_ext.clone().map(|e| strip_dot(&e)))
            .with_answer_extension(self.answer_ext.clone().map(|e| strip_dot(&e)))
            .with_pretty(self.common.pretty)
    }
}

/// `--input-ext .in` and `--input-ext in` mean the same thing on the command line.
fn strip_dot(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_string()
}
