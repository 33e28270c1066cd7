//! Logging setup.

use pkgstat_lib::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `--quiet` forces warnings only,
/// `-v`/`-vv` raise the level, and the config file level applies.
pub(crate) fn init(verbose: u8, quiet: bool, settings: &LoggingSettings) {
    let level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => settings.directive().unwrap_or("info"),
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
