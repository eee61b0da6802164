pub mod archive;
pub mod directory;

pub use archive::ArchiveSource;
pub use directory::DirectorySource;

use crate::error::{CasePackError, Result};
use crate::testcase::{CasePair, Discovery, TestCase};

/// A place test cases are pulled from.
///
/// Discovery only lists pairs; contents are read one pair at a time so the
/// driver can report progress and a dry run never touches file contents.
pub trait CaseSource {
    /// Short human-readable description, e.g. the archive path.
    fn describe(&self) -> String;

    fn discover(&mut self) -> Result<Discovery>;

    fn read_pair(&mut self, pair: &CasePair) -> Result<TestCase>;
}

pub(crate) fn decode_text(bytes: Vec<u8>, name: &str) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| CasePackError::InvalidUtf8 {
        name: name.to_string(),
    })
}
