//! Configuration management for the curriculum tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (curriculum.toml)
//! - Environment variables (CURRICULUM__*)
//!
//! ## Example config file (curriculum.toml):
//! ```toml
//! [source]
//! data_dir = "./data"
//!
//! [validation]
//! check_monotonic = true
//! check_naming = true
//! strict = false
//!
//! [output]
//! format = "pretty"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurriculumConfig {
    /// Where curriculum data comes from
    #[serde(default)]
    pub source: SourceConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Data source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding manifest.json, syllabus.json and levels/.
    /// When unset, the bundle compiled into the crate is used.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Check that permitted nodes only grow along the progression
    #[serde(default = "default_true")]
    pub check_monotonic: bool,

    /// Check id and title conventions
    #[serde(default = "default_true")]
    pub check_naming: bool,

    /// Treat warnings as errors
    #[serde(default)]
    pub strict: bool,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    /// Render a value as JSON in this format
    pub fn render<T: Serialize>(&self, value: &T) -> serde_json::Result<String> {
        match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_monotonic: true,
            check_naming: true,
            strict: false,
        }
    }
}

impl CurriculumConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "curriculum.toml",
            ".curriculum.toml",
            "config/curriculum.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "jiki", "curriculum") {
            let xdg_config = config_dir.config_dir().join("curriculum.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // CURRICULUM__VALIDATION__STRICT=true etc.
        builder = builder.add_source(
            Environment::with_prefix("CURRICULUM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// The data directory, with relative paths resolved against the working directory
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.source.data_dir.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                std::env::current_dir().unwrap_or_default().join(p)
            }
        })
    }
}
