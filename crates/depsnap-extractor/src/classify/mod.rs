//! Direct/indirect classification within a single walk.

use depsnap_core::types::Relationship;

/// Classify a node relative to the configuration being walked.
///
/// Only first-level dependencies of the configuration are direct. Escalation
/// across configurations is the aggregator's job, not this function's.
pub fn classify(is_root_of_configuration: bool) -> Relationship {
    if is_root_of_configuration {
        Relationship::Direct
    } else {
        Relationship::Indirect
    }
}
