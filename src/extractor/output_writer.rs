use crate::error::{CasePackError, Result};
use crate::testcase::TestCase;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) => OutputTarget::File(path.to_path_buf()),
            None => OutputTarget::Stdout,
        }
    }
}

/// Serialises a result set as a JSON array.
///
/// Compact output is a single line terminated by a newline. A file target is
/// written to a sibling temporary file and renamed into place, so an existing
/// file is never left half written.
pub struct OutputWriter {
    target: OutputTarget,
    pretty: bool,
}

impl OutputWriter {
    pub fn new(target: OutputTarget) -> Self {
        Self {
            target,
            pretty: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn write_cases(&self, cases: &[TestCase]) -> Result<()> {
        match &self.target {
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                self.write_to(stdout.lock(), cases)
            }
            OutputTarget::File(path) => {
                let parent = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));

                if !parent.is_dir() {
                    return Err(CasePackError::InvalidPath {
                        path: format!("Output directory does not exist: {}", parent.display()),
                    });
                }

                let mut temp = NamedTempFile::new_in(parent)?;
                self.write_to(temp.as_file_mut(), cases)?;
                temp.persist(path).map_err(|e| CasePackError::Io(e.error))?;

                log::info!("Wrote {} test cases to {}", cases.len(), path.display());
                Ok(())
            }
        }
    }

    pub fn write_to<W: Write>(&self, writer: W, cases: &[TestCase]) -> Result<()> {
        let mut writer = BufWriter::new(writer);

        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, cases)?;
        } else {
            serde_json::to_writer(&mut writer, cases)?;
        }

        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn render(&self, cases: &[TestCase]) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, cases)?;
        String::from_utf8(buffer).map_err(|_| CasePackError::InvalidUtf8 {
            name: "rendered output".to_string(),
        })
    }
}
