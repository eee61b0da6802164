use crate::error::{CasePackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub directory: DirectoryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Entry name prefix marking the test directory.
    pub test_prefix: String,
    /// Appended to an input entry's name to form its answer entry.
    pub answer_suffix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub input_extension: String,
    pub answer_extension: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            test_prefix: "tests/".to_string(),
            answer_suffix: ".a".to_string(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            input_extension: "in".to_string(),
            answer_extension: "ans".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CasePackError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CasePackError::Config {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| CasePackError::Config {
                message: format!("Failed to parse config file {}: {}", path.display(), e),
            })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["casepack.toml", ".casepack.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        log::debug!("Using configuration from {}", default_path);
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref prefix) = cli_args.test_prefix {
            self.archive.test_prefix = prefix.clone();
        }

        if let Some(ref suffix) = cli_args.answer_suffix {
            self.archive.answer_suffix = suffix.clone();
        }

        if let Some(ref ext) = cli_args.input_extension {
            self.directory.input_extension = ext.clone();
        }

        if let Some(ref ext) = cli_args.answer_extension {
            self.directory.answer_extension = ext.clone();
        }

        if cli_args.pretty {
            self.output.pretty = true;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| CasePackError::Config {
                message: format!("Failed to serialize config: {}", e),
            })?;

        std::fs::write(path, content)
            .map_err(|e| CasePackError::Config {
                message: format!("Failed to write config file {}: {}", path.display(), e),
            })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.archive.test_prefix.is_empty() {
            return Err(CasePackError::Config {
                message: "Archive test prefix must not be empty".to_string(),
            });
        }

        if self.archive.answer_suffix.is_empty() {
            return Err(CasePackError::Config {
                message: "Archive answer suffix must not be empty".to_string(),
            });
        }

        for (label, ext) in [
            ("input", &self.directory.input_extension),
            ("answer", &self.directory.answer_extension),
        ] {
            if ext.is_empty() {
                return Err(CasePackError::Config {
                    message: format!("The {} extension must not be empty", label),
                });
            }

            if ext.starts_with('.') {
                return Err(CasePackError::Config {
                    message: format!(
                        "The {} extension must be given without a leading dot: {}",
                        label, ext
                    ),
                });
            }
        }

        if self.directory.input_extension == self.directory.answer_extension {
            return Err(CasePackError::Config {
                message: format!(
                    "Input and answer extensions must differ (both are {})",
                    self.directory.input_extension
                ),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub test_prefix: Option<String>,
    pub answer_suffix: Option<String>,
    pub input_extension: Option<String>,
    pub answer_extension: Option<String>,
    pub pretty: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_test_prefix(mut self, prefix: Option<String>) -> Self {
        self.test_prefix = prefix;
        self
    }

    pub fn with_answer_suffix(mut self, suffix: Option<String>) -> Self {
        self.answer_suffix = suffix;
        self
    }

    pub fn with_input_extension(mut self, ext: Option<String>) -> Self {
        self.input_extension = ext;
        self
    }

    pub fn with_answer_extension(mut self, ext: Option<String>) -> Self {
        self.answer_extension = ext;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.archive.test_prefix, "tests/");
        assert_eq!(config.archive.answer_suffix, ".a");
        assert_eq!(config.directory.input_extension, "in");
        assert_eq!(config.directory.answer_extension, "ans");
        assert!(!config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.directory.input_extension = ".in".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.directory.answer_extension.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.directory.answer_extension = "in".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.archive.answer_suffix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.archive.answer_suffix = ".ans".to_string();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.archive.answer_suffix, ".ans");
        assert_eq!(loaded_config.archive.test_prefix, "tests/");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[directory]\nanswer_extension = \"out\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.directory.answer_extension, "out");
        assert_eq!(config.directory.input_extension, "in");
        assert_eq!(config.archive.test_prefix, "tests/");
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/nonexistent/casepack.toml");
        assert!(matches!(result, Err(CasePackError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_answer_extension(Some("out".to_string()))
            .with_test_prefix(Some("data/".to_string()))
            .with_pretty(true);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.directory.answer_extension, "out");
        assert_eq!(config.directory.input_extension, "in");
        assert_eq!(config.archive.test_prefix, "data/");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[archive]"));
        assert!(sample.contains("[directory]"));
        assert!(sample.contains("[output]"));
    }
}
