//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking a `CommandContext`.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use tracing::{debug, info};

use depsnap_config::{ConfigLayering, ConfigLoader, ConfigSource, ExtractorConfig};
use depsnap_core::error::{DepsnapError, DepsnapResult};

pub mod check;
pub mod extract;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    /// `DEPENDENCY_GRAPH_*` variables captured at startup
    pub env: HashMap<String, String>,
}

impl CommandContext {
    /// Create a context rooted at the process working directory
    pub async fn new() -> DepsnapResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| DepsnapError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| DepsnapError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Working directory is not valid UTF-8: {}", e),
        })?;

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
            env: ConfigLayering::collect_env_overrides(),
        })
    }

    /// Resolve `path` against the working directory
    pub fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        self.cwd.join(path)
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> DepsnapResult<()> {
    match command {
        Commands::Extract(args) => {
            info!("Extracting dependency graph from {}", args.events);
            extract::execute(args, ctx).await
        },
        Commands::Check { config } => {
            info!("Checking configuration");
            check::execute(config, ctx).await
        },
        Commands::Version => {
            info!("Showing version information");
            show_version(ctx).await
        },
    }
}

/// Load the file configuration and layer environment and CLI overrides on it
pub async fn load_config(
    ctx: &CommandContext,
    explicit: Option<&Utf8Path>,
    cli_overrides: &HashMap<String, String>,
) -> DepsnapResult<(ExtractorConfig, ConfigSource)> {
    let loader = ConfigLoader::new(ctx.cwd.clone());
    let (file_config, source) = loader.load(explicit).await?;
    debug!("Configuration source: {:?}", source);

    let config = ConfigLayering::merge_configs(file_config, &ctx.env, cli_overrides)?;
    Ok((config, source))
}

async fn show_version(ctx: &CommandContext) -> DepsnapResult<()> {
    ctx.output.step(
        "depsnap",
        &format!("v{} (dependency-graph manifest extractor)", env!("CARGO_PKG_VERSION")),
    );
    Ok(())
}
