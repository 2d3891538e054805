//! `depsnap extract`: replay recorded build events into a manifest.

use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use depsnap_config::ExtractorConfig;
use depsnap_core::error::{DepsnapError, DepsnapResult};
use depsnap_core::types::Manifest;
use depsnap_extractor::{ConfigurationFilter, ManifestAggregator, ManifestSerializer, ProvenanceTracker};

use super::{load_config, CommandContext};
use crate::events::BuildEvents;
use crate::ExtractArgs;

/// Execute the extract command
pub async fn execute(args: ExtractArgs, ctx: &CommandContext) -> DepsnapResult<()> {
    let overrides = cli_overrides(&args);
    let (config, _) = load_config(ctx, args.config.as_deref(), &overrides).await?;

    let events = BuildEvents::load(&ctx.resolve(&args.events)).await?;
    info!(
        "Replaying {} configurations and {} repository notifications",
        events.configurations.len(),
        events.repositories.len()
    );

    let filter = ConfigurationFilter::new(
        config.include_projects.as_deref(),
        config.include_configurations.as_deref(),
    )?;

    let manifest = tokio::task::spawn_blocking(move || build_manifest(&events, filter))
        .await
        .map_err(|e| DepsnapError::consistency(format!("extraction task failed: {}", e)))??;

    let serializer = if args.compact {
        ManifestSerializer::compact()
    } else {
        ManifestSerializer::new()
    };
    let rendered = serializer.serialize(&manifest)?;

    match destination(&args, &config, ctx) {
        Some(path) => {
            write_manifest(&path, &rendered).await?;
            ctx.output.success(&format!(
                "Wrote {} packages ({} direct) to {}",
                manifest.len(),
                manifest.direct_count(),
                path
            ));
        },
        None => {
            let mut stdout = tokio::io::stdout();
            let written = async {
                stdout.write_all(&rendered).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await
            };
            written
                .await
                .map_err(|e| DepsnapError::io("Failed to write manifest to stdout".to_string(), e))?;
        },
    }

    Ok(())
}

/// Build the manifest for a set of recorded events.
///
/// Repository notifications are recorded first, then every configuration
/// is extracted in parallel into one aggregator.
pub fn build_manifest(events: &BuildEvents, filter: ConfigurationFilter) -> DepsnapResult<Manifest> {
    let provenance = Arc::new(ProvenanceTracker::new());
    events.record_provenance(&provenance);

    let aggregator = ManifestAggregator::new(provenance).with_filter(filter);
    events.configurations.par_iter().for_each(|configuration| {
        if aggregator.on_configuration_resolved(configuration).is_err() {
            debug!(
                "Continuing past failed configuration {} - {}",
                configuration.project_path, configuration.configuration_name
            );
        }
    });

    aggregator.finalize()
}

fn cli_overrides(args: &ExtractArgs) -> HashMap<String, String> {
    let mut overrides = HashMap::new();
    if let Some(pattern) = &args.include_projects {
        overrides.insert("include-projects".to_string(), pattern.clone());
    }
    if let Some(pattern) = &args.include_configurations {
        overrides.insert("include-configurations".to_string(), pattern.clone());
    }
    if let Some(dir) = &args.report_dir {
        overrides.insert("report-dir".to_string(), dir.to_string());
    }
    overrides
}

/// Where the manifest goes; `None` means stdout
fn destination(args: &ExtractArgs, config: &ExtractorConfig, ctx: &CommandContext) -> Option<Utf8PathBuf> {
    args.output
        .as_deref()
        .map(|path| ctx.resolve(path))
        .or_else(|| config.manifest_path().map(|path| ctx.resolve(&path)))
}

async fn write_manifest(path: &Utf8Path, rendered: &[u8]) -> DepsnapResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DepsnapError::io(format!("Failed to create {}", parent), e))?;
        }
    }

    let mut content = rendered.to_vec();
    content.push(b'\n');
    tokio::fs::write(path, content)
        .await
        .map_err(|e| DepsnapError::io(format!("Failed to write manifest to {}", path), e))
}
