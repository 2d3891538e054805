//! Error types and result aliases for depsnap operations.
//!
//! Every error in the extraction core is build-fatal: nothing here is
//! retried, and a manifest is only produced when no error was raised.

use thiserror::Error;

/// Unified error type for all depsnap operations
#[derive(Error, Debug)]
pub enum DepsnapError {
    // Extraction errors
    #[error("Malformed package identifier for '{coordinates}': {reason}")]
    MalformedIdentifier { coordinates: String, reason: String },

    #[error("Invalid resolved graph: {reason}")]
    InvalidGraph { reason: String },

    #[error("{count} configuration(s) failed to extract, first: {first}")]
    ExtractionFailed { count: usize, first: String },

    #[error("Internal consistency fault: {reason}")]
    InternalConsistency { reason: String },

    // Config errors
    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error("Invalid pattern for '{field}': {message}")]
    PatternSyntax { field: String, message: String },

    #[error("Failed to parse {what}: {message}")]
    InputParse { what: String, message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for depsnap operations
pub type DepsnapResult<T> = Result<T, DepsnapError>;

impl DepsnapError {
    /// Create a malformed identifier error
    pub fn malformed(coordinates: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            coordinates: coordinates.into(),
            reason: reason.into(),
        }
    }

    /// Create an internal consistency error
    pub fn consistency(reason: impl Into<String>) -> Self {
        Self::InternalConsistency {
            reason: reason.into(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DepsnapError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            DepsnapError::MalformedIdentifier { .. } => {
                Some("Check the group, name and version reported for this module by the build")
            },
            DepsnapError::InvalidGraph { .. } => {
                Some("Re-capture the resolution events; the dependency graph is incomplete")
            },
            DepsnapError::ExtractionFailed { .. } => {
                Some("No manifest was written; fix the reported configuration and re-run the build")
            },
            DepsnapError::InternalConsistency { .. } => {
                Some("This is a bug in depsnap, please report it with the input that caused it")
            },
            DepsnapError::PatternSyntax { .. } => {
                Some("Filters are regular expressions matched against the whole value")
            },
            DepsnapError::ConfigValidation { .. } => Some("Check depsnap.toml and DEPENDENCY_GRAPH_* variables"),
            _ => None,
        }
    }
}
