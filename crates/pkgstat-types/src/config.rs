//! YAML configuration document.
//!
//! Every key is optional; missing sections fall back to built-in defaults.
//!
//! ```yaml
//! download:
//!   mirror_url: "http://ftp.uk.debian.org/debian/dists/stable/main/Contents-{arch}.gz"
//!   retry_count: 3
//!   wait_seconds: 5
//!   timeout_seconds: 300
//! parse:
//!   top_n: 10
//!   validate_lines: false
//! logging:
//!   level: info
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{ConfigError, MirrorTemplate, RetryPolicy};

/// File name looked up in the platform configuration directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Download settings.
    pub download: DownloadSettings,
    /// Parse and ranking settings.
    pub parse: ParseSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Settings for the retrying fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownloadSettings {
    /// Mirror URL template.
    pub mirror_url: MirrorTemplate,
    /// Maximum number of download attempts.
    pub retry_count: u32,
    /// Seconds to wait between attempts.
    pub wait_seconds: u64,
    /// Seconds a download may stall without receiving data. Zero disables the
    /// timeout.
    pub timeout_seconds: u64,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            mirror_url: MirrorTemplate::default(),
            retry_count: RetryPolicy::DEFAULT_MAX_ATTEMPTS,
            wait_seconds: RetryPolicy::DEFAULT_WAIT.as_secs(),
            timeout_seconds: 300,
        }
    }
}

impl DownloadSettings {
    /// Returns the retry policy described by these settings.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_count, Duration::from_secs(self.wait_seconds))
    }

    /// Returns the idle read timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        match self.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Settings for parsing and ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseSettings {
    /// Number of packages to report. Zero or negative yields an empty ranking.
    pub top_n: i64,
    /// Skip lines that do not look like `<path> <packages>`.
    pub validate_lines: bool,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            validate_lines: false,
        }
    }
}

impl ParseSettings {
    /// Returns `top_n` clamped to a usable count.
    #[must_use]
    pub fn top_n(&self) -> usize {
        usize::try_from(self.top_n.max(0)).unwrap_or(usize::MAX)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Log level name (`trace`, `debug`, `info`, `warn`, `error`).
    ///
    /// Upper-case names and `WARNING`/`CRITICAL` are accepted as well.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    /// Returns the level as a `tracing` directive, or `None` if unrecognised.
    #[must_use]
    pub fn directive(&self) -> Option<&'static str> {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" => Some("trace"),
            "debug" => Some("debug"),
            "info" => Some("info"),
            "warn" | "warning" => Some("warn"),
            "error" | "critical" => Some("error"),
            "off" => Some("off"),
            _ => None,
        }
    }
}

impl Config {
    /// Parses configuration from a YAML string and validates it.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a value is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.download.retry_count == 0 {
            return Err(ConfigError::Invalid {
                field: "download.retry_count",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.download.mirror_url.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "download.mirror_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.logging.directive().is_none() {
            return Err(ConfigError::Invalid {
                field: "logging.level",
                reason: format!("unknown level {:?}", self.logging.level),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.download.retry_policy(), RetryPolicy::default());
        assert_eq!(config.parse.top_n(), 10);
        assert!(!config.parse.validate_lines);
        assert_eq!(config.logging.directive(), Some("info"));
    }

    #[test]
    fn test_full_document() {
        let yaml = r#"
download:
  mirror_url: "http://mirror.local/debian/dists/stable/main/Contents-{arch}.gz"
  retry_count: 5
  wait_seconds: 2
  timeout_seconds: 0
parse:
  top_n: 25
  validate_lines: true
logging:
  level: DEBUG
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.download.mirror_url.as_str(),
            "http://mirror.local/debian/dists/stable/main/Contents-{arch}.gz"
        );
        let policy = config.download.retry_policy();
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.wait(), Duration::from_secs(2));
        assert_eq!(config.download.timeout(), None);
        assert_eq!(config.parse.top_n(), 25);
        assert!(config.parse.validate_lines);
        assert_eq!(config.logging.directive(), Some("debug"));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::from_yaml("parse:\n  top_n: 3\n").unwrap();
        assert_eq!(config.parse.top_n(), 3);
        assert_eq!(config.download, DownloadSettings::default());
    }

    #[test]
    fn test_negative_top_n_clamps_to_zero() {
        let config = Config::from_yaml("parse:\n  top_n: -4\n").unwrap();
        assert_eq!(config.parse.top_n(), 0);
    }

    #[test]
    fn test_python_level_names() {
        for (level, directive) in [("WARNING", "warn"), ("CRITICAL", "error"), ("Info", "info")] {
            let settings = LoggingSettings {
                level: level.to_string(),
            };
            assert_eq!(settings.directive(), Some(directive));
        }
    }

    #[test]
    fn test_zero_retry_count_rejected() {
        let err = Config::from_yaml("download:\n  retry_count: 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "download.retry_count",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_level_rejected() {
        let err = Config::from_yaml("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "logging.level",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_yaml("parse:\n  top: 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "download:\n  wait_seconds: 1").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.download.wait_seconds, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
