//! Configuration management.
//!
//! Handles loading and saving configuration from a TOML file in the user
//! config directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Drafting service settings
    pub ai: AiConfig,

    /// Export settings
    pub export: ExportConfig,
}

/// Drafting service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Model to use
    pub model: String,

    /// Base URL override, for proxies or compatible APIs
    pub base_url: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self { model: "gemini-2.0-flash".to_string(), base_url: None }
    }
}

/// Export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory to write reports into; defaults to the working directory
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Path to the config file (`<config dir>/konteks/config.toml`).
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("konteks").join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Write the configuration back to disk, creating parent directories.
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::path() else {
            anyhow::bail!("could not determine the config directory");
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
