pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod runner;
pub mod source;
pub mod testcase;
pub mod ui;

// Public API re-exports
pub use cli::{ArchiveCli, CommonArgs, DirectoryCli, ExtractorArgs, MessageFormat};
pub use config::{ArchiveConfig, CliOverrides, Config, DirectoryConfig, OutputConfig};
pub use error::{CasePackError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{CaseExtractor, ExtractionProgress, ExtractionReport, ExtractionStats, OutputTarget, OutputWriter};
pub use source::{ArchiveSource, CaseSource, DirectorySource};
pub use testcase::{CasePair, Discovery, TestCase};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface: one configured extraction run.
pub struct CasePack {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl CasePack {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            progress_manager: ProgressManager::new(!quiet),
        }
    }

    /// Build an instance from parsed command-line arguments.
    pub fn from_args<A: ExtractorArgs>(args: &A) -> Result<Self> {
        let config = args.load_config()?;
        let common = args.common();
        let output_mode = match common.message_format {
            MessageFormat::Human => OutputMode::Human,
            MessageFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, common.verbose, common.quiet))
    }

    pub fn open_archive<P: AsRef<Path>>(&self, path: P) -> Result<ArchiveSource> {
        ArchiveSource::open(path, &self.config.archive)
    }

    pub fn open_directory<P: AsRef<Path>>(&self, path: P) -> Result<DirectorySource> {
        DirectorySource::new(path.as_ref(), &self.config.directory)
    }

    /// Read every test pair from `source`, showing progress on stderr.
    pub fn extract(&self, source: &mut dyn CaseSource) -> Result<ExtractionReport> {
        self.output_formatter
            .start_operation(&format!("Extracting tests from {}", source.describe()));

        let extractor = CaseExtractor::new();
        let discovery = extractor.discover(source)?;
        let case_progress = self
            .progress_manager
            .create_case_progress(discovery.pairs.len() as u64);

        let progress_callback = {
            let pb = case_progress.clone();
            move |progress: &ExtractionProgress| {
                ui::progress::update_case_progress(&pb, progress);
            }
        };

        let result = extractor.read_all(source, discovery, Some(&progress_callback));
        ui::progress::finish_progress(&case_progress);
        let report = result?;

        for skipped in &report.stats.skipped {
            self.output_formatter
                .debug(&format!("Skipped {}: no answer entry", skipped));
        }
        self.output_formatter.print_extraction_summary(&report.stats);

        Ok(report)
    }

    /// List the pairs `source` would yield without reading any contents.
    pub fn dry_run(&self, source: &mut dyn CaseSource) -> Result<Discovery> {
        let discovery = CaseExtractor::new().discover(source)?;
        self.output_formatter
            .print_discovery(&source.describe(), &discovery);
        Ok(discovery)
    }

    pub fn write_output(&self, cases: &[TestCase], target: OutputTarget) -> Result<()> {
        OutputWriter::new(target)
            .with_pretty(self.config.output.pretty)
            .write_cases(cases)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        std::fs::write(output_path.as_ref(), Config::create_sample_config())?;
        Ok(())
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &CasePackError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Read all test cases from a zip archive using the default naming convention.
pub fn extract_archive<P: AsRef<Path>>(path: P) -> Result<Vec<TestCase>> {
    let mut source = ArchiveSource::open(path, &ArchiveConfig::default())?;
    Ok(CaseExtractor::new().extract(&mut source, None)?.cases)
}

/// Read all test cases from a directory of `.in`/`.ans` pairs.
pub fn extract_directory<P: AsRef<Path>>(path: P) -> Result<Vec<TestCase>> {
    let mut source = DirectorySource::new(path.as_ref(), &DirectoryConfig::default())?;
    Ok(CaseExtractor::new().extract(&mut source, None)?.cases)
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::archive::test_support::build_zip;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_casepack() -> CasePack {
        CasePack::new(Config::default(), OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_extract_archive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("package.zip");
        fs::write(
            &path,
            build_zip(&[("tests/1", "1 1\n"), ("tests/1.a", "2\n"), ("tests/2", "x")]),
        )
        .unwrap();

        let cases = extract_archive(&path).unwrap();
        assert_eq!(cases, vec![TestCase::new("1 1\n", "2\n")]);
    }

    #[test]
    fn test_extract_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("01.in"), "5\n").unwrap();
        fs::write(temp_dir.path().join("01.ans"), "120\n").unwrap();

        let cases = extract_directory(temp_dir.path()).unwrap();
        assert_eq!(cases, vec![TestCase::new("5\n", "120\n")]);
    }

    #[test]
    fn test_casepack_extract_and_write() {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("a.in"), "a").unwrap();
        fs::write(data.join("a.ans"), "A").unwrap();

        let casepack = quiet_casepack();
        let mut source = casepack.open_directory(&data).unwrap();
        let report = casepack.extract(&mut source).unwrap();
        assert_eq!(report.stats.cases, 1);

        let out = temp_dir.path().join("out.json");
        casepack
            .write_output(&report.cases, OutputTarget::File(out.clone()))
            .unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "[{\"input\":\"a\",\"answer\":\"A\"}]\n"
        );
    }

    #[test]
    fn test_dry_run_reads_nothing() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.in"), [0xffu8, 0xfe]).unwrap();
        fs::write(temp_dir.path().join("a.ans"), "ok").unwrap();

        let casepack = quiet_casepack();
        let mut source = casepack.open_directory(temp_dir.path()).unwrap();

        // Invalid UTF-8 would fail a real extraction.
        let discovery = casepack.dry_run(&mut source).unwrap();
        assert_eq!(discovery.pairs.len(), 1);
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        CasePack::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[archive]"));
        assert!(content.contains("[directory]"));
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
