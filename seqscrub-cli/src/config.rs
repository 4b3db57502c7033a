//! Configuration handling for the seqscrub CLI
//!
//! Supports loading configuration from seqscrub.toml files with CLI
//! argument overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use seqscrub_core::{ComplexityThresholds, ValidateConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub validate: ValidateSection,
    #[serde(default)]
    pub complexity: ComplexitySection,
    #[serde(default)]
    pub report: ReportSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateSection {
    /// Sanitize sequences by default
    #[serde(default)]
    pub sanitize: bool,

    /// Default minimum sequence length
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexitySection {
    /// Sequences shorter than this are never flagged as low-complexity
    #[serde(default = "default_min_scored_len")]
    pub min_scored_len: usize,

    /// Most-frequent-character fraction that flags a sequence
    #[serde(default = "default_dominant_fraction")]
    pub dominant_fraction: f64,

    /// Repeat-unit coverage fraction that flags a sequence
    #[serde(default = "default_repeat_fraction")]
    pub repeat_fraction: f64,

    /// Longest repeat unit considered
    #[serde(default = "default_max_repeat_unit")]
    pub max_repeat_unit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    /// Default report format when not deducible from the output path
    #[serde(default = "default_report_format")]
    pub format: String,
}

// Default value functions
fn default_min_length() -> usize {
    20
}
fn default_min_scored_len() -> usize {
    10
}
fn default_dominant_fraction() -> f64 {
    0.80
}
fn default_repeat_fraction() -> f64 {
    0.90
}
fn default_max_repeat_unit() -> usize {
    3
}
fn default_report_format() -> String {
    "json".to_string()
}

impl Default for ValidateSection {
    fn default() -> Self {
        Self {
            sanitize: false,
            min_length: default_min_length(),
        }
    }
}

impl Default for ComplexitySection {
    fn default() -> Self {
        Self {
            min_scored_len: default_min_scored_len(),
            dominant_fraction: default_dominant_fraction(),
            repeat_fraction: default_repeat_fraction(),
            max_repeat_unit: default_max_repeat_unit(),
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            format: default_report_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate: ValidateSection::default(),
            complexity: ComplexitySection::default(),
            report: ReportSection::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find seqscrub.toml in current directory
                let default_path = PathBuf::from("seqscrub.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: seqscrub.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Resolve engine settings from configuration plus CLI overrides.
    pub fn validate_config(
        &self,
        sanitize_flag: bool,
        min_length_flag: Option<usize>,
    ) -> ValidateConfig {
        ValidateConfig {
            sanitize: sanitize_flag || self.validate.sanitize,
            min_length: min_length_flag.unwrap_or(self.validate.min_length),
            complexity: ComplexityThresholds {
                min_scored_len: self.complexity.min_scored_len,
                dominant_fraction: self.complexity.dominant_fraction,
                repeat_fraction: self.complexity.repeat_fraction,
                max_repeat_unit: self.complexity.max_repeat_unit,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.validate.sanitize);
        assert_eq!(config.validate.min_length, 20);
        assert_eq!(config.complexity.max_repeat_unit, 3);
        assert_eq!(config.report.format, "json");
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let config = Config::default();
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded = Config::load_from_file(temp_file.path())?;

        assert_eq!(config.validate.min_length, loaded.validate.min_length);
        assert_eq!(config.report.format, loaded.report.format);
        assert_eq!(
            config.complexity.dominant_fraction,
            loaded.complexity.dominant_fraction
        );

        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(temp_file.path(), "[validate]\nmin_length = 50\n")?;

        let config = Config::load_from_file(temp_file.path())?;
        assert_eq!(config.validate.min_length, 50);
        assert!(!config.validate.sanitize);
        assert_eq!(config.report.format, "json");

        Ok(())
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default();

        let resolved = config.validate_config(true, Some(5));
        assert!(resolved.sanitize);
        assert_eq!(resolved.min_length, 5);

        let resolved = config.validate_config(false, None);
        assert!(!resolved.sanitize);
        assert_eq!(resolved.min_length, 20);
    }
}
