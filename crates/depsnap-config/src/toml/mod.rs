//! depsnap.toml parsing and validation

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ConfigResult;
use depsnap_core::error::DepsnapError;

/// Complete depsnap.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepsnapToml {
    /// Extraction settings
    #[serde(default)]
    pub extract: ExtractorConfig,
}

/// Settings of the extraction host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Regex a project path must fully match to be extracted
    #[serde(default, rename = "include-projects", skip_serializing_if = "Option::is_none")]
    pub include_projects: Option<String>,

    /// Regex a configuration name must fully match to be extracted
    #[serde(
        default,
        rename = "include-configurations",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_configurations: Option<String>,

    /// Directory the manifest is written to
    #[serde(default, rename = "report-dir", skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<Utf8PathBuf>,
}

impl ExtractorConfig {
    /// Name of the manifest file written into the report directory
    pub const MANIFEST_FILE_NAME: &'static str = "dependency-graph.json";

    /// Manifest path inside the report directory, if one is configured
    pub fn manifest_path(&self) -> Option<Utf8PathBuf> {
        self.report_dir
            .as_ref()
            .map(|dir| dir.join(Self::MANIFEST_FILE_NAME))
    }
}

/// Parse depsnap.toml content
pub fn parse_depsnap_toml(content: &str) -> ConfigResult<DepsnapToml> {
    let config: DepsnapToml = ::toml::from_str(content).map_err(|e| DepsnapError::InputParse {
        what: crate::CONFIG_FILE_NAME.to_string(),
        message: e.to_string(),
    })?;

    validate_config(&config.extract)?;
    Ok(config)
}

/// Serialize configuration back to TOML
pub fn serialize_depsnap_toml(config: &DepsnapToml) -> ConfigResult<String> {
    ::toml::to_string_pretty(config).map_err(|e| DepsnapError::ConfigValidation {
        field: "config".to_string(),
        reason: format!("Failed to serialize configuration: {}", e),
    })
}

/// Validate the extraction settings
pub fn validate_config(config: &ExtractorConfig) -> ConfigResult<()> {
    validate_pattern("include-projects", config.include_projects.as_deref())?;
    validate_pattern("include-configurations", config.include_configurations.as_deref())?;

    if let Some(dir) = &config.report_dir {
        if dir.as_str().trim().is_empty() {
            return Err(DepsnapError::ConfigValidation {
                field: "report-dir".to_string(),
                reason: "Report directory cannot be empty".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_pattern(field: &str, pattern: Option<&str>) -> ConfigResult<()> {
    match pattern {
        Some(pattern) => Regex::new(pattern)
            .map(|_| ())
            .map_err(|e| DepsnapError::PatternSyntax {
                field: field.to_string(),
                message: e.to_string(),
            }),
        None => Ok(()),
    }
}

/// Load and validate depsnap.toml from a file
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<DepsnapToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DepsnapError::io(format!("Failed to read {}", path), e))?;

    parse_depsnap_toml(&content).map_err(|e| match e {
        DepsnapError::InputParse { what, message } => DepsnapError::InputParse {
            what: format!("{} ({})", what, path),
            message,
        },
        other => other,
    })
}
