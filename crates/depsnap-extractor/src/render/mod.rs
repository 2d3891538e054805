//! Manifest serialization to the dependency-graph wire format.
//!
//! Output is a JSON list of entries sorted by package URL, each with its
//! dependencies sorted as well, so two builds with the same graph produce
//! byte-identical documents whatever order configurations resolved in.

use depsnap_core::error::DepsnapError;
use depsnap_core::types::{Manifest, ManifestEntry};

use crate::ExtractResult;

/// Renders a finalized manifest
#[derive(Debug, Clone, Copy)]
pub struct ManifestSerializer {
    pretty: bool,
}

impl ManifestSerializer {
    /// Serializer producing indented JSON
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Serializer producing single-line JSON
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Render the manifest.
    ///
    /// Fails with `InternalConsistency` if the manifest breaks an invariant
    /// established while it was built.
    pub fn serialize(&self, manifest: &Manifest) -> ExtractResult<Vec<u8>> {
        check_consistency(manifest)?;

        let entries: Vec<&ManifestEntry> = manifest.entries().collect();
        let rendered = if self.pretty {
            serde_json::to_vec_pretty(&entries)
        } else {
            serde_json::to_vec(&entries)
        };
        rendered.map_err(|e| DepsnapError::consistency(format!("manifest is not renderable: {}", e)))
    }
}

impl Default for ManifestSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn check_consistency(manifest: &Manifest) -> ExtractResult<()> {
    for (key, entry) in manifest.iter() {
        if key != &entry.purl {
            return Err(DepsnapError::consistency(format!(
                "entry {} is stored under {}",
                entry.purl, key
            )));
        }
        if entry.dependencies.contains(key) {
            return Err(DepsnapError::consistency(format!("{} depends on itself", key)));
        }
        if let Some(missing) = entry.dependencies.iter().find(|d| !manifest.contains(*d)) {
            return Err(DepsnapError::consistency(format!(
                "{} depends on {} which has no entry",
                key, missing
            )));
        }
    }
    Ok(())
}
