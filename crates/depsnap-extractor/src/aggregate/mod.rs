//! Build-wide manifest aggregation.
//!
//! `ManifestAggregator` is the only owner of the in-progress manifest. The
//! host calls `on_configuration_resolved` from any thread once per resolved
//! configuration; every merge runs under one lock, so no two merges touch
//! the same entry concurrently. Merging is commutative and idempotent in
//! the relationship and edge set of every entry.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info};

use depsnap_core::error::DepsnapError;
use depsnap_core::types::{Manifest, ResolvedConfiguration};

use crate::filter::ConfigurationFilter;
use crate::provenance::ProvenanceTracker;
use crate::walk::{GraphWalker, WalkRecord};
use crate::ExtractResult;

/// Folds walk output from every configuration of a build into one manifest
#[derive(Debug)]
pub struct ManifestAggregator {
    manifest: Mutex<Manifest>,
    provenance: Arc<ProvenanceTracker>,
    filter: ConfigurationFilter,
    walker: GraphWalker,
    /// Extraction failures; any entry makes `finalize` fail
    failures: Mutex<Vec<String>>,
}

impl ManifestAggregator {
    /// Create an aggregator that reads provenance from `provenance`
    pub fn new(provenance: Arc<ProvenanceTracker>) -> Self {
        Self {
            manifest: Mutex::new(Manifest::new()),
            provenance,
            filter: ConfigurationFilter::include_all(),
            walker: GraphWalker::new(),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Only extract configurations accepted by `filter`
    pub fn with_filter(mut self, filter: ConfigurationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Provenance tracker shared with the host's repository notifications
    pub fn provenance(&self) -> &Arc<ProvenanceTracker> {
        &self.provenance
    }

    /// Merge a batch of walk records into the manifest.
    ///
    /// New identifiers are inserted; known ones keep the stronger
    /// relationship and scope, and the union of dependencies. Repository metadata is
    /// refreshed when provenance is known and left untouched otherwise.
    pub fn merge<I>(&self, records: I)
    where
        I: IntoIterator<Item = WalkRecord>,
    {
        let mut manifest = self.manifest.lock();
        for record in records {
            let repository = self.provenance.lookup(&record.module.module_version_id());
            let entry = manifest.upsert(
                record.purl,
                record.relationship,
                record.scope,
                record.dependencies,
            );
            if let Some(repository) = repository {
                entry.set_repository(repository);
            }
        }
    }

    /// Host callback for one resolution-complete event.
    ///
    /// Returns the number of records merged. On failure nothing from this
    /// configuration is merged and the failure is kept for `finalize`.
    pub fn on_configuration_resolved(
        &self,
        configuration: &ResolvedConfiguration,
    ) -> ExtractResult<usize> {
        let project = configuration.project_path.as_str();
        let name = configuration.configuration_name.as_str();

        if !self.filter.include(project, name) {
            debug!("Ignoring resolved configuration: {} - {}", project, name);
            return Ok(0);
        }
        if configuration.graph.is_empty() {
            debug!("No dependencies to extract for {} - {}", project, name);
            return Ok(0);
        }

        match self.walker.walk_configuration(configuration) {
            Ok(records) => {
                let count = records.len();
                self.merge(records);
                debug!("Merged {} packages from {} - {}", count, project, name);
                Ok(count)
            },
            Err(e) => {
                error!("Failed to extract {} - {}: {}", project, name, e);
                self.failures
                    .lock()
                    .push(format!("{} - {}: {}", project, name, e));
                Err(e)
            },
        }
    }

    /// Copy of the manifest as merged so far
    pub fn snapshot(&self) -> Manifest {
        self.manifest.lock().clone()
    }

    /// Check if any configuration failed to extract
    pub fn has_failures(&self) -> bool {
        !self.failures.lock().is_empty()
    }

    /// Finish the build: the final, read-only manifest.
    ///
    /// Fails with `ExtractionFailed` if any configuration failed to extract.
    pub fn finalize(self) -> ExtractResult<Manifest> {
        let failures = self.failures.into_inner();
        if let Some(first) = failures.first() {
            return Err(DepsnapError::ExtractionFailed {
                count: failures.len(),
                first: first.clone(),
            });
        }

        let manifest = self.manifest.into_inner();
        info!(
            "Dependency manifest complete: {} packages ({} direct)",
            manifest.len(),
            manifest.direct_count()
        );
        Ok(manifest)
    }
}
