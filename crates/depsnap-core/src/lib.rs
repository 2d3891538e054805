//! # depsnap-core
//!
//! Core types and errors shared across all depsnap crates.
//!
//! This crate provides:
//! - `PackageUrl`, the canonical package identifier used as manifest key
//! - `Relationship`, `DependencyScope` and the manifest types produced by extraction
//! - `ResolvedGraph`, the arena form of a host's resolved dependency graph
//! - `DepsnapError` enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (coordinates, identifiers, graphs, manifests)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{DepsnapError, DepsnapResult};
pub use types::{
    ComponentIndex, DependencyScope, Manifest, ManifestEntry, ModuleCoordinates, PackageUrl, Relationship,
    ResolvedComponent, ResolvedConfiguration, ResolvedGraph,
};
