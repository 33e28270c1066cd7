//! pkgstat CLI - Debian Contents file package statistics.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod display;
mod logging;
mod settings;

use display::Format;
use settings::Overrides;

#[derive(Parser)]
#[command(name = "pkgstat")]
#[command(
    about = "Download a Debian Contents file and list the packages with the most files",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Architecture to fetch the Contents file for (e.g. amd64, arm64, mips)
    architecture: String,

    /// Configuration file (YAML). Defaults to the platform config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mirror URL template; {arch} is replaced by the architecture
    #[arg(short, long)]
    mirror: Option<String>,

    /// Number of packages to show
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    top: Option<i64>,

    /// Skip lines that do not look like `<path> <packages>`
    #[arg(long)]
    validate: bool,

    /// Maximum download attempts
    #[arg(long)]
    retries: Option<u32>,

    /// Seconds to wait between download attempts
    #[arg(long)]
    wait: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress progress output and informational logs)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = settings::load(cli.config.as_deref())?;
    let config = settings::apply(
        config,
        Overrides {
            mirror: cli.mirror,
            top: cli.top,
            validate: cli.validate,
            retries: cli.retries,
            wait: cli.wait,
        },
    )?;

    logging::init(cli.verbose, cli.quiet, &config.logging);

    commands::analyze::analyze(&cli.architecture, &config, cli.format, cli.quiet).await
}
