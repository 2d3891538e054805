//! `depsnap check`: validate the layered configuration.

use camino::Utf8PathBuf;
use std::collections::HashMap;

use depsnap_config::ConfigSource;
use depsnap_core::error::DepsnapResult;
use depsnap_extractor::ConfigurationFilter;

use super::{load_config, CommandContext};

/// Execute the check command
pub async fn execute(config: Option<Utf8PathBuf>, ctx: &CommandContext) -> DepsnapResult<()> {
    let (config, source) = load_config(ctx, config.as_deref(), &HashMap::new()).await?;

    // Patterns are compiled exactly as extraction compiles them
    ConfigurationFilter::new(
        config.include_projects.as_deref(),
        config.include_configurations.as_deref(),
    )?;

    match &source {
        ConfigSource::Explicit(path) | ConfigSource::Discovered(path) => {
            ctx.output.info(&format!("Using {}", path));
        },
        ConfigSource::Default => ctx.output.info("No depsnap.toml found, using defaults"),
    }

    ctx.output.info(&format!(
        "Projects: {}",
        config.include_projects.as_deref().unwrap_or("all")
    ));
    ctx.output.info(&format!(
        "Configurations: {}",
        config.include_configurations.as_deref().unwrap_or("all")
    ));
    match config.manifest_path() {
        Some(path) => ctx.output.info(&format!("Manifest: {}", ctx.resolve(&path))),
        None => ctx.output.info("Manifest: stdout"),
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}
