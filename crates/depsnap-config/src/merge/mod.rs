//! Configuration discovery, layering and environment overrides

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;

use crate::toml::{validate_config, ExtractorConfig};
use crate::{ConfigResult, CONFIG_FILE_NAME, ENV_INCLUDE_CONFIGURATIONS, ENV_INCLUDE_PROJECTS, ENV_REPORT_DIR};
use depsnap_core::error::DepsnapError;

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Explicitly requested config file
    Explicit(Utf8PathBuf),
    /// depsnap.toml found in the working directory or a parent
    Discovered(Utf8PathBuf),
    /// No file; built-in defaults
    Default,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load the file configuration, from `explicit` if given, else by discovery
    pub async fn load(&self, explicit: Option<&Utf8Path>) -> ConfigResult<(ExtractorConfig, ConfigSource)> {
        if let Some(path) = explicit {
            let path = self.cwd.join(path);
            let config = crate::toml::load_from_file(&path).await?;
            return Ok((config.extract, ConfigSource::Explicit(path)));
        }

        match self.find_config_file() {
            Some(path) => {
                let config = crate::toml::load_from_file(&path).await?;
                Ok((config.extract, ConfigSource::Discovered(path)))
            },
            None => Ok((ExtractorConfig::default(), ConfigSource::Default)),
        }
    }

    /// Find depsnap.toml in the working directory or its parents
    pub fn find_config_file(&self) -> Option<Utf8PathBuf> {
        let mut current = Some(self.cwd.as_path());
        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            current = dir.parent();
        }
        None
    }
}

/// Configuration layering and merging
pub struct ConfigLayering;

impl ConfigLayering {
    /// Layer environment then CLI overrides over the file configuration
    pub fn merge_configs(
        file_config: ExtractorConfig,
        env_overrides: &HashMap<String, String>,
        cli_overrides: &HashMap<String, String>,
    ) -> ConfigResult<ExtractorConfig> {
        let mut merged = file_config;

        Self::apply_env_overrides(&mut merged, env_overrides);
        Self::apply_cli_overrides(&mut merged, cli_overrides)?;

        validate_config(&merged)?;
        Ok(merged)
    }

    fn apply_env_overrides(config: &mut ExtractorConfig, overrides: &HashMap<String, String>) {
        for (key, value) in overrides {
            match key.as_str() {
                ENV_INCLUDE_PROJECTS => config.include_projects = Some(value.clone()),
                ENV_INCLUDE_CONFIGURATIONS => config.include_configurations = Some(value.clone()),
                ENV_REPORT_DIR => config.report_dir = Some(Utf8PathBuf::from(value)),
                _ => {
                    // Unknown environment variable, ignore
                },
            }
        }
    }

    fn apply_cli_overrides(
        config: &mut ExtractorConfig,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "include-projects" => config.include_projects = Some(value.clone()),
                "include-configurations" => config.include_configurations = Some(value.clone()),
                "report-dir" => config.report_dir = Some(Utf8PathBuf::from(value)),
                other => {
                    return Err(DepsnapError::ConfigValidation {
                        field: other.to_string(),
                        reason: "Unknown command-line override".to_string(),
                    });
                },
            }
        }

        Ok(())
    }

    /// Collect DEPENDENCY_GRAPH_* environment variables
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with("DEPENDENCY_GRAPH_"))
            .collect()
    }
}
