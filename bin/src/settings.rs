//! Configuration discovery and command-line overrides.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use pkgstat_lib::{Config, DEFAULT_CONFIG_FILE, MirrorTemplate};
use std::path::{Path, PathBuf};

/// Values given on the command line that replace config file values.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) mirror: Option<String>,
    pub(crate) top: Option<i64>,
    pub(crate) validate: bool,
    pub(crate) retries: Option<u32>,
    pub(crate) wait: Option<u64>,
}

/// Platform configuration file, e.g. `~/.config/pkgstat/config.yml`.
pub(crate) fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pkgstat").map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_FILE))
}

/// Load the explicit config file, else the platform one if present, else defaults.
pub(crate) fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.is_file() => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        _ => Ok(Config::default()),
    }
}

/// Apply command-line overrides and re-validate.
pub(crate) fn apply(mut config: Config, overrides: Overrides) -> Result<Config> {
    if let Some(mirror) = overrides.mirror {
        config.download.mirror_url = MirrorTemplate::new(mirror);
    }
    if let Some(top) = overrides.top {
        config.parse.top_n = top;
    }
    if overrides.validate {
        config.parse.validate_lines = true;
    }
    if let Some(retries) = overrides.retries {
        config.download.retry_count = retries;
    }
    if let Some(wait) = overrides.wait {
        config.download.wait_seconds = wait;
    }

    config.validate().context("Invalid command-line option")?;
    Ok(config)
}
