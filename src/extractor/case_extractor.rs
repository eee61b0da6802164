use crate::error::Result;
use crate::source::CaseSource;
use crate::testcase::{Discovery, TestCase};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub cases_read: usize,
    pub total_cases: usize,
    pub bytes_read: u64,
    pub current_case: Option<String>,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new(total_cases: usize) -> Self {
        Self {
            cases_read: 0,
            total_cases,
            bytes_read: 0,
            current_case: None,
            start_time: Instant::now(),
        }
    }

    pub fn update_case(&mut self, name: String, bytes: u64) {
        self.cases_read += 1;
        self.bytes_read += bytes;
        self.current_case = Some(name);
    }

    pub fn percentage(&self) -> f64 {
        if self.total_cases == 0 {
            0.0
        } else {
            (self.cases_read as f64 / self.total_cases as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionStats {
    pub source: String,
    pub cases: usize,
    pub skipped: Vec<String>,
    pub bytes_read: u64,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub cases: Vec<TestCase>,
    pub stats: ExtractionStats,
}

/// Drives a [`CaseSource`]: discover every pair, then read them in order.
///
/// The first error aborts the run, so callers never see a partial result.
#[derive(Debug, Default)]
pub struct CaseExtractor;

impl CaseExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn discover(&self, source: &mut dyn CaseSource) -> Result<Discovery> {
        let discovery = source.discover()?;

        log::info!(
            "Discovered {} test pairs in {} ({} skipped)",
            discovery.pairs.len(),
            source.describe(),
            discovery.skipped.len()
        );

        Ok(discovery)
    }

    pub fn extract(
        &self,
        source: &mut dyn CaseSource,
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<ExtractionReport> {
        let discovery = self.discover(source)?;
        self.read_all(source, discovery, progress_callback)
    }

    /// Read the pairs of an earlier discovery, in order.
    pub fn read_all(
        &self,
        source: &mut dyn CaseSource,
        discovery: Discovery,
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<ExtractionReport> {
        let mut progress = ExtractionProgress::new(discovery.pairs.len());
        let mut cases = Vec::with_capacity(discovery.pairs.len());

        for pair in &discovery.pairs {
            let case = source.read_pair(pair)?;
            progress.update_case(pair.display_name(), case.size());
            cases.push(case);

            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        let stats = ExtractionStats {
            source: source.describe(),
            cases: cases.len(),
            skipped: discovery.skipped,
            bytes_read: progress.bytes_read,
            duration: progress.elapsed(),
        };

        Ok(ExtractionReport { cases, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CasePackError;
    use crate::testcase::CasePair;
    use std::cell::RefCell;

    struct FakeSource {
        pairs: Vec<CasePair>,
        fail_on: Option<usize>,
        reads: usize,
    }

    impl FakeSource {
        fn with_pairs(count: usize) -> Self {
            let pairs = (1..=count)
                .map(|i| CasePair::new(format!("{}", i), format!("{}.a", i)))
                .collect();
            Self {
                pairs,
                fail_on: None,
                reads: 0,
            }
        }
    }

    impl CaseSource for FakeSource {
        fn describe(&self) -> String {
            "fake".to_string()
        }

        fn discover(&mut self) -> Result<Discovery> {
            Ok(Discovery {
                pairs: self.pairs.clone(),
                skipped: vec!["orphan".to_string()],
            })
        }

        fn read_pair(&mut self, pair: &CasePair) -> Result<TestCase> {
            self.reads += 1;
            if self.fail_on == Some(self.reads) {
                return Err(CasePackError::InvalidUtf8 {
                    name: pair.display_name(),
                });
            }
            Ok(TestCase::new(pair.display_name(), pair.answer.to_string_lossy()))
        }
    }

    #[test]
    fn test_extract_preserves_order_and_reports() {
        let mut source = FakeSource::with_pairs(3);
        let report = CaseExtractor::new().extract(&mut source, None).unwrap();

        let inputs: Vec<&str> = report.cases.iter().map(|c| c.input.as_str()).collect();
        assert_eq!(inputs, vec!["1", "2", "3"]);
        assert_eq!(report.stats.cases, 3);
        assert_eq!(report.stats.skipped, vec!["orphan".to_string()]);
        assert_eq!(report.stats.bytes_read, 3 + 9);
        assert_eq!(report.stats.source, "fake");
    }

    #[test]
    fn test_progress_callback_sees_every_case() {
        let mut source = FakeSource::with_pairs(4);
        let seen = RefCell::new(Vec::new());
        let callback = |progress: &ExtractionProgress| {
            seen.borrow_mut().push(progress.cases_read);
        };

        CaseExtractor::new().extract(&mut source, Some(&callback)).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_first_error_aborts() {
        let mut source = FakeSource::with_pairs(5);
        source.fail_on = Some(2);

        let result = CaseExtractor::new().extract(&mut source, None);
        assert!(matches!(result, Err(CasePackError::InvalidUtf8 { .. })));
        assert_eq!(source.reads, 2);
    }

    #[test]
    fn test_empty_source() {
        let mut source = FakeSource::with_pairs(0);
        let report = CaseExtractor::new().extract(&mut source, None).unwrap();
        assert!(report.cases.is_empty());
    }

    #[test]
    fn test_progress_percentage() {
        let mut progress = ExtractionProgress::new(4);
        assert_eq!(progress.percentage(), 0.0);
        progress.update_case("1".to_string(), 10);
        assert_eq!(progress.percentage(), 25.0);
        assert_eq!(ExtractionProgress::new(0).percentage(), 0.0);
    }
}
