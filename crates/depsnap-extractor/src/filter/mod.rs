//! Selection of the configurations that contribute to the manifest.

use regex::Regex;

use depsnap_core::error::DepsnapError;

use crate::ExtractResult;

/// Include filter on project path and configuration name.
///
/// Each pattern that is set must match the whole value.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationFilter {
    project: Option<Regex>,
    configuration: Option<Regex>,
}

impl ConfigurationFilter {
    /// Build a filter from optional project and configuration patterns
    pub fn new(
        project_pattern: Option<&str>,
        configuration_pattern: Option<&str>,
    ) -> ExtractResult<Self> {
        Ok(Self {
            project: project_pattern
                .map(|p| compile_full_match("include-projects", p))
                .transpose()?,
            configuration: configuration_pattern
                .map(|p| compile_full_match("include-configurations", p))
                .transpose()?,
        })
    }

    /// A filter that accepts every configuration
    pub fn include_all() -> Self {
        Self::default()
    }

    /// Check if a resolved configuration should be extracted
    pub fn include(&self, project_path: &str, configuration_name: &str) -> bool {
        if let Some(project) = &self.project {
            if !project.is_match(project_path) {
                return false;
            }
        }
        if let Some(configuration) = &self.configuration {
            if !configuration.is_match(configuration_name) {
                return false;
            }
        }
        true
    }
}

/// Anchor `pattern` so it must match the whole value.
///
/// The raw pattern is compiled on its own first: an unbalanced pattern
/// such as `a)|(b` would otherwise close the anchoring group early.
fn compile_full_match(field: &str, pattern: &str) -> ExtractResult<Regex> {
    let syntax_error = |e: regex::Error| DepsnapError::PatternSyntax {
        field: field.to_string(),
        message: e.to_string(),
    };
    Regex::new(pattern).map_err(syntax_error)?;
    Regex::new(&format!("^(?:{})$", pattern)).map_err(syntax_error)
}
