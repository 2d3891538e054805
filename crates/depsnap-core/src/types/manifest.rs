//! Manifest types produced by aggregating walk output.

use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};

use super::{DependencyScope, PackageUrl, Relationship};

/// Metadata key holding the repository a module version was fetched from
pub const REPOSITORY_METADATA_KEY: &str = "repository";

/// One package in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub purl: PackageUrl,
    pub relationship: Relationship,
    /// Effective scope over every configuration the package was seen in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<DependencyScope>,
    /// Identifiers this package depends on, kept sorted
    pub dependencies: BTreeSet<PackageUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl ManifestEntry {
    /// Create an entry without dependencies or metadata
    pub fn new(purl: PackageUrl, relationship: Relationship) -> Self {
        Self {
            purl,
            relationship,
            scope: None,
            dependencies: BTreeSet::new(),
            metadata: None,
        }
    }

    /// Fold another observation of the same package into this entry.
    ///
    /// Relationship and scope keep the stronger value, dependencies are
    /// unioned. An edge back to the entry itself is dropped.
    pub fn absorb<I>(
        &mut self,
        relationship: Relationship,
        scope: Option<DependencyScope>,
        dependencies: I,
    ) where
        I: IntoIterator<Item = PackageUrl>,
    {
        self.relationship = self.relationship.escalate(relationship);
        self.scope = DependencyScope::escalate(self.scope, scope);
        for dependency in dependencies {
            if dependency != self.purl {
                self.dependencies.insert(dependency);
            }
        }
    }

    /// Set or replace the repository this package was fetched from
    pub fn set_repository(&mut self, repository: impl Into<String>) {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(REPOSITORY_METADATA_KEY.to_string(), repository.into());
    }

    /// Repository recorded in the metadata, if any
    pub fn repository(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get(REPOSITORY_METADATA_KEY))
            .map(String::as_str)
    }
}

/// Deduplicated set of manifest entries keyed by canonical identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<PackageUrl, ManifestEntry>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package or fold the observation into its existing entry
    pub fn upsert<I>(
        &mut self,
        purl: PackageUrl,
        relationship: Relationship,
        scope: Option<DependencyScope>,
        dependencies: I,
    ) -> &mut ManifestEntry
    where
        I: IntoIterator<Item = PackageUrl>,
    {
        let entry = self
            .entries
            .entry(purl)
            .or_insert_with_key(|purl| ManifestEntry::new(purl.clone(), relationship));
        entry.absorb(relationship, scope, dependencies);
        entry
    }

    /// Get the entry for an identifier
    pub fn get<Q>(&self, purl: &Q) -> Option<&ManifestEntry>
    where
        PackageUrl: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(purl)
    }

    /// Check if an identifier has an entry
    pub fn contains<Q>(&self, purl: &Q) -> bool
    where
        PackageUrl: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(purl)
    }

    /// Entries with their keys, ordered by canonical identifier
    pub fn iter(&self) -> impl Iterator<Item = (&PackageUrl, &ManifestEntry)> {
        self.entries.iter()
    }

    /// Entries ordered by canonical identifier
    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.values()
    }

    /// Number of distinct packages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of packages declared directly by some configuration
    pub fn direct_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.relationship.is_direct())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModuleCoordinates;

    fn purl(name: &str, version: &str) -> PackageUrl {
        PackageUrl::maven(&ModuleCoordinates::new("org.example", name, version)).unwrap()
    }

    #[test]
    fn test_upsert_inserts_then_merges() {
        let mut manifest = Manifest::new();
        manifest.upsert(purl("a", "1.0"), Relationship::Indirect, None, [purl("b", "2.0")]);
        manifest.upsert(purl("a", "1.0"), Relationship::Direct, None, [purl("c", "3.0")]);

        assert_eq!(manifest.len(), 1);
        let entry = manifest.get("pkg:maven/org.example/a@1.0").unwrap();
        assert_eq!(entry.relationship, Relationship::Direct);
        assert_eq!(
            entry.dependencies.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            vec!["pkg:maven/org.example/b@2.0", "pkg:maven/org.example/c@3.0"]
        );
        assert_eq!(manifest.direct_count(), 1);
    }

    #[test]
    fn test_direct_is_never_downgraded() {
        let mut manifest = Manifest::new();
        manifest.upsert(purl("a", "1.0"), Relationship::Direct, None, []);
        manifest.upsert(purl("a", "1.0"), Relationship::Indirect, None, []);

        assert_eq!(
            manifest.get(&purl("a", "1.0")).unwrap().relationship,
            Relationship::Direct
        );
    }

    #[test]
    fn test_scope_escalates_to_runtime() {
        let mut manifest = Manifest::new();
        manifest.upsert(purl("a", "1.0"), Relationship::Direct, None, []);
        assert_eq!(manifest.get(&purl("a", "1.0")).unwrap().scope, None);

        manifest.upsert(purl("a", "1.0"), Relationship::Direct, Some(DependencyScope::Runtime), []);
        manifest.upsert(purl("a", "1.0"), Relationship::Direct, Some(DependencyScope::Development), []);
        manifest.upsert(purl("a", "1.0"), Relationship::Direct, None, []);

        assert_eq!(
            manifest.get(&purl("a", "1.0")).unwrap().scope,
            Some(DependencyScope::Runtime)
        );
    }

    #[test]
    fn test_absorb_drops_self_edge() {
        let mut manifest = Manifest::new();
        let entry = manifest.upsert(
            purl("a", "1.0"),
            Relationship::Direct,
            None,
            [purl("a", "1.0"), purl("b", "1.0")],
        );

        assert!(!entry.dependencies.contains(&purl("a", "1.0")));
        assert_eq!(entry.dependencies.len(), 1);
    }

    #[test]
    fn test_repository_metadata() {
        let mut entry = ManifestEntry::new(purl("a", "1.0"), Relationship::Direct);
        assert_eq!(entry.repository(), None);
        assert!(entry.metadata.is_none());

        entry.set_repository("https://repo.maven.apache.org/maven2");
        entry.set_repository("https://jitpack.io");
        assert_eq!(entry.repository(), Some("https://jitpack.io"));
        assert_eq!(entry.metadata.as_ref().unwrap().len(), 1);
    }
}
