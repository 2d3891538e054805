//! Recorded build events replayed by `depsnap extract`.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use depsnap_core::error::{DepsnapError, DepsnapResult};
use depsnap_core::types::ResolvedConfiguration;
use depsnap_extractor::ProvenanceTracker;

/// The host's repository-selection notification for one module version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryNotification {
    /// Module version identity, `group:module:version`
    pub module: String,
    /// Repository name or URL the module version was fetched from
    pub repository: String,
}

/// Every event a build emitted, in the order it emitted them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEvents {
    #[serde(default)]
    pub repositories: Vec<RepositoryNotification>,
    #[serde(default)]
    pub configurations: Vec<ResolvedConfiguration>,
}

impl BuildEvents {
    /// Parse an events document
    pub fn parse(content: &str, origin: &str) -> DepsnapResult<Self> {
        serde_json::from_str(content).map_err(|e| DepsnapError::InputParse {
            what: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse an events document from disk
    pub async fn load(path: &Utf8Path) -> DepsnapResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DepsnapError::io(format!("Failed to read events from {}", path), e))?;
        Self::parse(&content, path.as_str())
    }

    /// Replay the repository notifications into `tracker`
    pub fn record_provenance(&self, tracker: &ProvenanceTracker) {
        for notification in &self.repositories {
            tracker.record(notification.module.as_str(), &notification.repository);
        }
    }
}
