//! Runtime/development scope of a configuration and of the packages it resolves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the packages of a configuration end up.
///
/// Ordered so that `Runtime > Development`. An unknown scope is modelled as
/// `None`, which `Option`'s ordering places below both.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    /// Only needed to build or test (e.g. `testRuntimeClasspath`)
    Development,
    /// Shipped with the product
    Runtime,
}

impl DependencyScope {
    /// Effective scope of a package seen under `current` and `other`.
    ///
    /// Runtime wins over development, and any known scope wins over an
    /// unknown one.
    pub fn escalate(current: Option<Self>, other: Option<Self>) -> Option<Self> {
        current.max(other)
    }

    /// Wire name of the scope
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyScope::Development => "development",
            DependencyScope::Runtime => "runtime",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
