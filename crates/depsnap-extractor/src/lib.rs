//! Dependency graph extraction engine for depsnap
//!
//! This crate walks the resolved dependency graph of every configuration a
//! build resolves, and folds the results into one deduplicated manifest:
//!
//! - `walk`: per-configuration traversal, safe against shared and cyclic graphs
//! - `aggregate`: the single owner of the in-progress manifest
//! - `provenance`: which repository supplied each module version
//! - `render`: deterministic JSON output

pub mod aggregate;
pub mod classify;
pub mod filter;
pub mod provenance;
pub mod render;
pub mod walk;

// Re-export main types
pub use aggregate::ManifestAggregator;
pub use classify::classify;
pub use filter::ConfigurationFilter;
pub use provenance::ProvenanceTracker;
pub use render::ManifestSerializer;
pub use walk::{GraphWalker, WalkRecord};

use depsnap_core::error::DepsnapError;

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, DepsnapError>;
