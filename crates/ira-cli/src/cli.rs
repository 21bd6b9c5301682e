//! CLI configuration and settings management

use crate::{CliError, Result};
use clap::ValueEnum;
use ira_core::pretty::PrettyOptions;
use ira_translate::TranslateOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = "ira.toml";

/// CLI configuration loaded from config files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Reference data loaded for every translation
    pub tables: TablesConfig,

    /// Translation behavior
    pub translate: TranslateOptions,

    /// Output settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Schema files (TOML or JSON) registered before translating
    pub schemas: Vec<PathBuf>,

    /// Compatibility tables merged over the builtin one, in order
    pub compat: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Pretty-printer settings
    pub pretty: PrettyOptions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl CliConfig {
    /// Load configuration from file, falling back to defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let mut config = Self::default();

        // System config directory first, then home, then the working
        // directory; later files take precedence.
        if let Some(system_config) = Self::default_config_path() {
            if system_config.exists() {
                config = config.merge(Self::load_from_file(&system_config)?);
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".ira.toml");
            if home_config.exists() {
                config = config.merge(Self::load_from_file(&home_config)?);
            }
        }

        let local_config = Path::new(LOCAL_CONFIG);
        if local_config.exists() {
            config = config.merge(Self::load_from_file(local_config)?);
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CliError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| CliError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Merge this configuration with another, with the other taking precedence.
    /// Table file lists accumulate.
    pub fn merge(mut self, other: Self) -> Self {
        self.tables.schemas.extend(other.tables.schemas);
        self.tables.compat.extend(other.tables.compat);
        self.translate = other.translate;
        self.output = other.output;
        self
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ira").join("config.toml"))
    }
}
