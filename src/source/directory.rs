use crate::config::DirectoryConfig;
use crate::error::{CasePackError, Result};
use crate::source::{decode_text, CaseSource};
use crate::testcase::{CasePair, Discovery, TestCase};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Reads `name.in` / `name.ans` file pairs from the top level of a directory.
pub struct DirectorySource {
    root: PathBuf,
    input_extension: String,
    answer_extension: String,
}

impl DirectorySource {
    pub fn new<P: Into<PathBuf>>(root: P, config: &DirectoryConfig) -> Result<Self> {
        let root = root.into();

        if !root.exists() {
            return Err(CasePackError::InvalidPath {
                path: format!("{} does not exist", root.display()),
            });
        }

        if !root.is_dir() {
            return Err(CasePackError::InvalidPath {
                path: format!("{} is not a directory", root.display()),
            });
        }

        Ok(Self {
            root,
            input_extension: config.input_extension.clone(),
            answer_extension: config.answer_extension.clone(),
        })
    }

    fn is_input_file(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_file() {
            return false;
        }

        entry
            .path()
            .extension()
            .is_some_and(|ext| ext == self.input_extension.as_str())
    }
}

impl CaseSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }

    fn discover(&mut self) -> Result<Discovery> {
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut discovery = Discovery::default();

        for entry in walker {
            let entry = entry.map_err(|e| CasePackError::Io(e.into()))?;

            if !self.is_input_file(&entry) {
                continue;
            }

            let input = entry.into_path();
            let answer = input.with_extension(&self.answer_extension);

            if !answer.is_file() {
                return Err(CasePackError::MissingAnswer {
                    input: input.display().to_string(),
                    expected: answer.display().to_string(),
                });
            }

            log::debug!("Found pair {} / {}", input.display(), answer.display());
            discovery.pairs.push(CasePair::new(input, answer));
        }

        Ok(discovery)
    }

    fn read_pair(&mut self, pair: &CasePair) -> Result<TestCase> {
        let input = read_text(&pair.input)?;
        let answer = read_text(&pair.answer)?;
        Ok(TestCase::new(input, answer))
    }
}

/// Reads a file as UTF-8 with `\r\n` and lone `\r` line endings turned into `\n`.
fn read_text(path: &Path) -> Result<String> {
    let text = decode_text(fs::read(path)?, &path.to_string_lossy())?;
    Ok(normalize_newlines(text))
}

fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }

    text.replace("\r\n", "\n").replace('\r', "\n")
}
