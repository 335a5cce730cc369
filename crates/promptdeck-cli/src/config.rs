//! Configuration management for promptdeck CLI
//!
//! Stores the data file location and display settings in ~/.config/promptdeck/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "promptdeck";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "storage.json";

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage file override (defaults to the platform data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Characters of content shown in list previews
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_preview_chars() -> usize {
    80
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            preview_chars: default_preview_chars(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set the storage file location
    pub fn set_data_file(&mut self, path: PathBuf) {
        self.data_file = Some(path);
    }

    /// Resolve the storage file: explicit override, then config, then default
    pub fn resolve_data_file(&self, override_path: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = override_path.or_else(|| self.data_file.clone()) {
            return Ok(path);
        }
        let data_dir = dirs::data_dir()
            .context("Could not determine data directory")?
            .join(CONFIG_DIR);
        Ok(data_dir.join(DATA_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.data_file.is_none());
        assert_eq!(config.preview_chars, 80);
    }

    #[test]
    fn test_parse_values() {
        let config = Config::parse("data_file = \"/tmp/p.json\"\npreview_chars = 20\n").unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/p.json")));
        assert_eq!(config.preview_chars, 20);
    }

    #[test]
    fn test_override_wins_over_config() {
        let mut config = Config::default();
        config.set_data_file(PathBuf::from("/from/config.json"));

        let resolved = config
            .resolve_data_file(Some(PathBuf::from("/from/flag.json")))
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/from/flag.json"));

        let resolved = config.resolve_data_file(None).unwrap();
        assert_eq!(resolved, PathBuf::from("/from/config.json"));
    }
}
