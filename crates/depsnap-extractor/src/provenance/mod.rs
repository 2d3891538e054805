//! Repository provenance of resolved module versions.
//!
//! The host reports, once per resolved module version, which repository it
//! was fetched from. Reports may arrive from several resolution threads and
//! interleave with graph walking.

use dashmap::DashMap;
use tracing::warn;
use url::Url;

/// Concurrent map from module version identity to repository
#[derive(Debug, Default)]
pub struct ProvenanceTracker {
    repositories: DashMap<String, String>,
}

impl ProvenanceTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the repository a module version (`group:module:version`) came from.
    ///
    /// The last report wins if the same module version is reported twice.
    pub fn record(&self, module_version_id: impl Into<String>, repository: &str) {
        let module_version_id = module_version_id.into();
        let repository = normalize_repository(repository);

        if let Some(previous) = self
            .repositories
            .insert(module_version_id.clone(), repository.clone())
        {
            if previous != repository {
                warn!(
                    "Module {} reported from two repositories: '{}' replaced by '{}'",
                    module_version_id, previous, repository
                );
            }
        }
    }

    /// Repository recorded for a module version, if any
    pub fn lookup(&self, module_version_id: &str) -> Option<String> {
        self.repositories
            .get(module_version_id)
            .map(|entry| entry.value().clone())
    }

    /// Number of module versions with a known repository
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

/// Strip the trailing `/` from repository URLs; names pass through untouched
pub fn normalize_repository(repository: &str) -> String {
    match Url::parse(repository) {
        Ok(url) => url.as_str().trim_end_matches('/').to_string(),
        Err(_) => repository.to_string(),
    }
}
