//! Shared entry point for the `extract-polygon` and `extract-dir` binaries.

use crate::cli::{CommonArgs, ExtractorArgs};
use crate::error::{CasePackError, Result, UserFriendlyError};
use crate::extractor::OutputTarget;
use crate::source::CaseSource;
use crate::ui::{OutputFormatter, OutputMode};
use crate::CasePack;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Archive,
    Directory,
}

/// Run one extraction and return the process exit code.
pub fn run<A: ExtractorArgs>(args: &A, kind: SourceKind) -> i32 {
    let common = args.common();
    init_logging(common);

    if common.generate_config {
        return handle_generate_config(common);
    }

    let casepack = match CasePack::from_args(args) {
        Ok(casepack) => casepack,
        Err(e) => {
            print_startup_error(common, &e);
            return e.exit_code();
        }
    };

    let Some(path) = args.source_path() else {
        casepack.output_formatter().error("No input path given");
        return 2;
    };

    match execute(&casepack, path, kind, common) {
        Ok(()) => 0,
        Err(e) => {
            log::debug!("Extraction failed: {:?}", e);
            casepack.handle_error(&e);
            e.exit_code()
        }
    }
}

fn execute(casepack: &CasePack, path: &Path, kind: SourceKind, common: &CommonArgs) -> Result<()> {
    let mut source: Box<dyn CaseSource> = match kind {
        SourceKind::Archive => Box::new(casepack.open_archive(path)?),
        SourceKind::Directory => Box::new(casepack.open_directory(path)?),
    };

    if common.dry_run {
        casepack.dry_run(source.as_mut())?;
        return Ok(());
    }

    let report = casepack.extract(source.as_mut())?;

    if report.cases.is_empty() {
        casepack
            .output_formatter()
            .warning(&format!("No test pairs found in {}", report.stats.source));
    }

    casepack.write_output(&report.cases, OutputTarget::from_option(common.output.as_deref()))?;

    if let Some(ref output) = common.output {
        casepack.output_formatter().success(&format!(
            "Wrote {} test cases to {}",
            report.cases.len(),
            output.display()
        ));
    }

    Ok(())
}

/// `RUST_LOG` takes precedence over the `-v`/`-q` derived level.
pub fn init_logging(common: &CommonArgs) {
    let env = env_logger::Env::default().default_filter_or(common.log_filter());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
}

fn handle_generate_config(common: &CommonArgs) -> i32 {
    let config_path = common.config_path_or_default();

    match CasePack::generate_sample_config(&config_path) {
        Ok(()) => {
            eprintln!("Generated sample configuration file: {}", config_path.display());
            eprintln!("Edit it to change the naming conventions, then pass it with --config.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(common: &CommonArgs, error: &CasePackError) {
    let mode = match common.message_format {
        crate::cli::MessageFormat::Human => OutputMode::Human,
        crate::cli::MessageFormat::Plain => OutputMode::Plain,
    };
    OutputFormatter::new(mode, 0, false).print_user_friendly_error(error);
}
