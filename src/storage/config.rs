//! Configuration handling for the shape gallery
//!
//! Configuration is stored in `.gallery/config.toml` (library) and
//! `~/.config/shape-gallery/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::validate_name;

/// Name of the per-library configuration directory
pub const CONFIG_DIR: &str = ".gallery";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Library-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Gallery name; the document is stored as `<name>.gallery`
    pub name: String,

    /// Directory (relative to the library root) holding the image mirror
    pub mirror_dir: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: "My Shapes".to_string(),
            mirror_dir: "shapes".to_string(),
        }
    }
}

impl LibraryConfig {
    /// Checks that configured names are usable on disk
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_name(&self.name)
            .map_err(|e| ConfigError::Invalid(format!("name: {}", e)))?;
        validate_name(&self.mirror_dir)
            .map_err(|e| ConfigError::Invalid(format!("mirror_dir: {}", e)))?;
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + library)
#[derive(Debug, Clone)]
pub struct Config {
    pub library: LibraryConfig,
    pub global: GlobalConfig,
    pub library_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration for a specific library
    pub fn for_library(library_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let library = Self::load_library_config(library_root)?;

        Ok(Self {
            library,
            global,
            library_root: Some(library_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "shape-gallery", "shape-gallery")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads library configuration from a specific root
    fn load_library_config(library_root: &Path) -> Result<LibraryConfig> {
        let config_path = Self::config_path(library_root);

        if !config_path.exists() {
            return Ok(LibraryConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read library config: {}", config_path.display()))?;

        let config: LibraryConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse library config")?;

        config.validate()?;
        Ok(config)
    }

    /// Path of the library config file
    pub fn config_path(library_root: &Path) -> PathBuf {
        library_root.join(CONFIG_DIR).join("config.toml")
    }

    /// Finds the library root by looking for a `.gallery/` directory
    pub fn find_library_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(CONFIG_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns the library root, or an error if not in a library
    pub fn require_library_root(&self) -> Result<&Path> {
        self.library_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not in a shape gallery. Run 'gallery init' first."))
    }

    /// Saves the library configuration
    pub fn save_library(&self) -> Result<()> {
        let root = self.require_library_root()?;
        let config_path = Self::config_path(root);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content =
            toml::to_string_pretty(&self.library).context("Failed to serialize library config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write library config: {}", config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config {
            library: LibraryConfig::default(),
            global: GlobalConfig::default(),
            library_root: None,
        };

        assert_eq!(config.library.name, "My Shapes");
        assert_eq!(config.library.mirror_dir, "shapes");
        assert_eq!(config.global.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_library_config() {
        let toml = r#"
name = "Team Shapes"
mirror_dir = "images"
"#;

        let config: LibraryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.name, "Team Shapes");
        assert_eq!(config.mirror_dir, "images");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: LibraryConfig = toml::from_str("name = \"Icons\"").unwrap();
        assert_eq!(config.name, "Icons");
        assert_eq!(config.mirror_dir, "shapes");
    }

    #[test]
    fn invalid_names_are_rejected() {
        let config = LibraryConfig {
            name: "a/b".to_string(),
            ..LibraryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_global_config() {
        let config: GlobalConfig = toml::from_str("default_format = \"json\"").unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn save_and_reload_library_config() {
        let dir = TempDir::new().unwrap();
        let mut config = Config {
            library: LibraryConfig::default(),
            global: GlobalConfig::default(),
            library_root: Some(dir.path().to_path_buf()),
        };
        config.library.name = "Icons".to_string();
        config.save_library().unwrap();

        let loaded = Config::for_library(dir.path()).unwrap();
        assert_eq!(loaded.library.name, "Icons");
    }

    #[test]
    fn config_not_in_library() {
        let config = Config {
            library: LibraryConfig::default(),
            global: GlobalConfig::default(),
            library_root: None,
        };

        assert!(config.require_library_root().is_err());
    }
}
