use thiserror::Error;

#[derive(Error, Debug)]
pub enum CasePackError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read archive {path}: {message}")]
    Archive {
        path: String,
        message: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Entry is not valid UTF-8 text: {name}")]
    InvalidUtf8 { name: String },

    #[error("Missing answer file for {input}: expected {expected}")]
    MissingAnswer { input: String, expected: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CasePackError {
    fn user_message(&self) -> String {
        match self {
            CasePackError::Archive { path, message, .. } => {
                format!("Could not read archive {}: {}", path, message)
            }
            CasePackError::InvalidUtf8 { name } => {
                format!("Test file is not UTF-8 text: {}", name)
            }
            CasePackError::MissingAnswer { input, expected } => {
                format!("No answer file for {} (looked for {})", input, expected)
            }
            CasePackError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            CasePackError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CasePackError::Archive { .. } => Some(
                "Make sure the file is a complete zip archive, for example a Polygon package downloaded in full.".to_string()
            ),
            CasePackError::InvalidUtf8 { .. } => Some(
                "Binary or non-UTF-8 test data cannot be embedded in JSON strings; re-encode the file as UTF-8.".to_string()
            ),
            CasePackError::MissingAnswer { .. } => Some(
                "Every input file needs an answer file with the same base name. Add it or remove the input.".to_string()
            ),
            CasePackError::InvalidPath { .. } => Some(
                "Check that the path exists and points to the expected kind of source.".to_string()
            ),
            CasePackError::Config { .. } => Some(
                "Check your configuration file syntax, or run with --generate-config to see the defaults.".to_string()
            ),
            _ => None,
        }
    }
}

impl CasePackError {
    pub fn archive<P: AsRef<std::path::Path>>(path: P, error: zip::result::ZipError) -> Self {
        CasePackError::Archive {
            path: path.as_ref().display().to_string(),
            message: error.to_string(),
            source: error,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CasePackError::InvalidPath { .. } => 2,
            CasePackError::MissingAnswer { .. } => 3,
            CasePackError::Archive { .. } => 4,
            CasePackError::Config { .. } => 5,
            CasePackError::InvalidUtf8 { .. } => 6,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CasePackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = CasePackError::MissingAnswer {
            input: "b.in".to_string(),
            expected: "b.ans".to_string(),
        };
        assert!(error.user_message().contains("b.in"));
        assert!(error.user_message().contains("b.ans"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_exit_codes() {
        let missing = CasePackError::MissingAnswer {
            input: "a.in".to_string(),
            expected: "a.ans".to_string(),
        };
        assert_eq!(missing.exit_code(), 3);

        let archive = CasePackError::archive("broken.zip", zip::result::ZipError::FileNotFound);
        assert_eq!(archive.exit_code(), 4);
        assert!(archive.user_message().contains("broken.zip"));

        let io = CasePackError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(io.exit_code(), 1);
        assert!(io.suggestion().is_none());
    }
}
