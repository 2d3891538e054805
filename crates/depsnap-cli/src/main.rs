//! # depsnap-cli
//!
//! Host for the depsnap extraction engine. It replays the resolution events
//! a build recorded (resolved configurations and repository notifications),
//! and writes the resulting dependency-graph manifest.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use depsnap_core::error::{DepsnapError, DepsnapResult};
use tracing::{error, info};

mod commands;
mod events;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Dependency-graph manifest extractor
#[derive(Parser)]
#[command(name = "depsnap", version, about = "Dependency-graph manifest extractor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a manifest from recorded resolution events
    Extract(ExtractArgs),
    /// Validate configuration
    Check {
        /// Configuration file (defaults to depsnap.toml discovery)
        #[arg(long)]
        config: Option<Utf8PathBuf>,
    },
    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// JSON document of recorded resolution events
    pub events: Utf8PathBuf,

    /// Manifest destination (defaults to the report directory, else stdout)
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    /// Configuration file (defaults to depsnap.toml discovery)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Only extract projects whose path fully matches this regex
    #[arg(long)]
    pub include_projects: Option<String>,

    /// Only extract configurations whose name fully matches this regex
    #[arg(long)]
    pub include_configurations: Option<String>,

    /// Directory the manifest is written to when --output is not given
    #[arg(long)]
    pub report_dir: Option<Utf8PathBuf>,

    /// Write single-line JSON
    #[arg(long)]
    pub compact: bool,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting depsnap v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_cli(cli) {
        eprint!("{}", ErrorFormatter::new().format_error(&e));
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> DepsnapResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| DepsnapError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new().await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "depsnap={level},depsnap_extractor={level},depsnap_config={level}"
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("depsnap encountered an unexpected error: {}", panic_info);
        eprintln!("depsnap crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/depsnap/depsnap/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
