use crate::config::ArchiveConfig;
use crate::error::{CasePackError, Result};
use crate::source::{decode_text, CaseSource};
use crate::testcase::{CasePair, Discovery, TestCase};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// Reads test pairs from a zip archive laid out like a Polygon package:
/// `tests/1` paired with `tests/1.a`.
pub struct ArchiveSource<R: Read + Seek = BufReader<File>> {
    archive: ZipArchive<R>,
    label: String,
    test_prefix: String,
    answer_suffix: String,
}

impl ArchiveSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, config: &ArchiveConfig) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CasePackError::InvalidPath {
                path: format!("{} does not exist", path.display()),
            });
        }

        if path.is_dir() {
            return Err(CasePackError::InvalidPath {
                path: format!("{} is a directory, expected an archive", path.display()),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), path.display().to_string(), config)
    }
}

impl<R: Read + Seek> ArchiveSource<R> {
    pub fn from_reader<S: Into<String>>(reader: R, label: S, config: &ArchiveConfig) -> Result<Self> {
        let label = label.into();
        let archive = ZipArchive::new(reader).map_err(|e| CasePackError::archive(&label, e))?;

        log::debug!("Opened archive {} with {} entries", label, archive.len());

        Ok(Self {
            archive,
            label,
            test_prefix: config.test_prefix.clone(),
            answer_suffix: config.answer_suffix.clone(),
        })
    }

    /// Entry names under the test prefix, in central directory order.
    ///
    /// Entries are opened raw so that listing never needs a decompressor.
    fn test_entry_names(&mut self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for index in 0..self.archive.len() {
            let entry = self
                .archive
                .by_index_raw(index)
                .map_err(|e| CasePackError::archive(&self.label, e))?;

            if entry.name().starts_with(&self.test_prefix) {
                names.push(entry.name().to_string());
            }
        }

        Ok(names)
    }

    fn read_entry(&mut self, name: &str) -> Result<String> {
        let mut entry = self
            .archive
            .by_name(name)
            .map_err(|e| CasePackError::archive(&self.label, e))?;

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| CasePackError::archive(&self.label, ZipError::Io(e)))?;

        decode_text(bytes, name)
    }
}

impl<R: Read + Seek> CaseSource for ArchiveSource<R> {
    fn describe(&self) -> String {
        format!("archive {}", self.label)
    }

    fn discover(&mut self) -> Result<Discovery> {
        let names = self.test_entry_names()?;
        let known: HashSet<&str> = names.iter().map(String::as_str).collect();
        let mut discovery = Discovery::default();

        for name in &names {
            if name.ends_with('/') || name.ends_with(&self.answer_suffix) {
                continue;
            }

            let answer = format!("{}{}", name, self.answer_suffix);
            if known.contains(answer.as_str()) {
                discovery.pairs.push(CasePair::new(name, answer));
            } else {
                log::debug!("Skipping {}: no {} entry", name, answer);
                discovery.skipped.push(name.clone());
            }
        }

        Ok(discovery)
    }

    fn read_pair(&mut self, pair: &CasePair) -> Result<TestCase> {
        let input = self.read_entry(&pair.input.to_string_lossy())?;
        let answer = self.read_entry(&pair.answer.to_string_lossy())?;
        Ok(TestCase::new(input, answer))
    }
}
