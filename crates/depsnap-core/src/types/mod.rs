//! Core data types for dependency-graph extraction.
//!
//! This module provides the fundamental types used throughout depsnap:
//! - Module coordinates as reported by the build
//! - Canonical package identifiers (package URLs)
//! - Resolved graphs handed over by the host resolution engine
//! - Relationship and scope of a package to the build
//! - Manifest entries produced by aggregation

pub mod coordinates;
pub mod graph;
pub mod manifest;
pub mod purl;
pub mod relationship;
pub mod scope;

// Re-export all public types
pub use coordinates::ModuleCoordinates;
pub use graph::{ComponentIndex, ResolvedComponent, ResolvedConfiguration, ResolvedGraph};
pub use manifest::{Manifest, ManifestEntry};
pub use purl::PackageUrl;
pub use relationship::Relationship;
pub use scope::DependencyScope;
