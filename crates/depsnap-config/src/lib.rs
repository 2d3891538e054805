//! Configuration loading for depsnap
//!
//! This crate finds and parses `depsnap.toml`, then layers environment and
//! command-line overrides on top of it to produce the `ExtractorConfig`
//! used by the extraction host.

pub mod merge;
pub mod toml;

// Re-export main types
pub use crate::merge::{ConfigLayering, ConfigLoader, ConfigSource};
pub use crate::toml::{DepsnapToml, ExtractorConfig};

use depsnap_core::error::DepsnapError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, DepsnapError>;

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = "depsnap.toml";

/// Environment variable overriding the project include pattern
pub const ENV_INCLUDE_PROJECTS: &str = "DEPENDENCY_GRAPH_INCLUDE_PROJECTS";
/// Environment variable overriding the configuration include pattern
pub const ENV_INCLUDE_CONFIGURATIONS: &str = "DEPENDENCY_GRAPH_INCLUDE_CONFIGURATIONS";
/// Environment variable overriding the report directory
pub const ENV_REPORT_DIR: &str = "DEPENDENCY_GRAPH_REPORT_DIR";
