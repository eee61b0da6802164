use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One input text paired with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub answer: String,
}

impl TestCase {
    pub fn new<I: Into<String>, A: Into<String>>(input: I, answer: A) -> Self {
        Self {
            input: input.into(),
            answer: answer.into(),
        }
    }

    pub fn size(&self) -> u64 {
        (self.input.len() + self.answer.len()) as u64
    }
}

/// Locations of a discovered pair, before either side is read.
///
/// For archives these are entry names; for directories, file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasePair {
    pub input: PathBuf,
    pub answer: PathBuf,
}

impl CasePair {
    pub fn new<I: Into<PathBuf>, A: Into<PathBuf>>(input: I, answer: A) -> Self {
        Self {
            input: input.into(),
            answer: answer.into(),
        }
    }

    pub fn display_name(&self) -> String {
        display(&self.input)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub pairs: Vec<CasePair>,
    /// Input candidates that had no answer counterpart.
    pub skipped: Vec<String>,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_and_order() {
        let case = TestCase::new("1 2\n", "3\n");
        let json = serde_json::to_string(&case).unwrap();
        assert_eq!(json, r#"{"input":"1 2\n","answer":"3\n"}"#);
    }

    #[test]
    fn test_case_size() {
        let case = TestCase::new("abc", "de");
        assert_eq!(case.size(), 5);
    }

    #[test]
    fn test_pair_display_name() {
        let pair = CasePair::new("tests/01", "tests/01.a");
        assert_eq!(pair.display_name(), "tests/01");
    }
}
