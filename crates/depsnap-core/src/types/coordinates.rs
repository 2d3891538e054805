//! Module coordinates reported by the host resolution engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Group, module and version of a resolved module version
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleCoordinates {
    /// Group or namespace (e.g. "org.apache.commons"); may be empty
    #[serde(default)]
    pub group: String,
    /// Module or artifact name
    pub module: String,
    /// Resolved version
    pub version: String,
}

impl ModuleCoordinates {
    /// Create coordinates from their three parts
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version: version.into(),
        }
    }

    /// Module version identity (`group:module:version`), the provenance key
    pub fn module_version_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ModuleCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.module, self.version)
    }
}
