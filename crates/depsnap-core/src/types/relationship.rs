//! Direct/indirect relationship of a package to the build.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a package is reached from the configurations of a build.
///
/// Variants are ordered so that `Direct > Indirect`; merging two
/// observations of the same package keeps the maximum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    /// Pulled in through another package's dependencies
    Indirect,
    /// Declared by the configuration itself
    Direct,
}

impl Relationship {
    /// Combine two observations, keeping the stronger relationship
    pub fn escalate(self, other: Relationship) -> Relationship {
        self.max(other)
    }

    /// Check if this relationship is direct
    pub fn is_direct(&self) -> bool {
        matches!(self, Relationship::Direct)
    }

    /// Wire name of the relationship
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Indirect => "indirect",
            Relationship::Direct => "direct",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_outranks_indirect() {
        assert!(Relationship::Direct > Relationship::Indirect);
        assert_eq!(
            Relationship::Indirect.escalate(Relationship::Direct),
            Relationship::Direct
        );
        assert_eq!(
            Relationship::Direct.escalate(Relationship::Indirect),
            Relationship::Direct
        );
        assert_eq!(
            Relationship::Indirect.escalate(Relationship::Indirect),
            Relationship::Indirect
        );
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Relationship::Direct).unwrap(), "\"direct\"");
        assert_eq!(serde_json::to_string(&Relationship::Indirect).unwrap(), "\"indirect\"");
        assert_eq!(Relationship::Direct.to_string(), "direct");
    }
}
