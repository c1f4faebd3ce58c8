//! Copydown Config
//!
//! This crate handles configuration loading and management for copydown,
//! supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/copydown/config.toml`
//! - macOS: `~/Library/Application Support/copydown/config.toml`
//! - Windows: `%APPDATA%\copydown\config.toml`
//!
//! # Example
//!
//! ```no_run
//! use copydown_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_from("./custom.toml".as_ref()).unwrap();
//! ```

mod buttons;
mod markup;

pub use buttons::ButtonsConfig;
pub use markup::MarkupConfig;

use copydown_core::{CopydownError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[buttons]
CopyMd   = true
CopyCsv  = true
MdLabel  = "<span>md</span>"
CsvLabel = "<span>csv</span>"

[markup]
ContainerClass = ""
ContainerStyle = "display: grid; grid-template: auto;"
ButtonBarClass = ""
ButtonBarStyle = "justify-self: end; align-self: end;"
ButtonClass    = ""
ButtonStyle    = ""
"#;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Copy button configuration
    #[serde(default)]
    pub buttons: ButtonsConfig,

    /// Class and inline style configuration
    #[serde(default)]
    pub markup: MarkupConfig,
}

impl Default for Config {
    fn default() -> Self {
        // Parse the default TOML to ensure consistency
        toml::from_str(DEFAULT_TOML).expect("Default TOML should be valid")
    }
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use copydown_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[buttons]"));
    /// assert!(toml.contains("[markup]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "copydown")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the platform path, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CopydownError::Config(e.to_string()))
    }

    /// Merge another config into this one.
    pub fn merge(&mut self, other: &Config) {
        self.buttons.merge(&other.buttons);
        self.markup.merge(&other.markup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_default_toml() {
        let from_toml: Config = toml::from_str(DEFAULT_TOML).unwrap();
        assert_eq!(Config::default(), from_toml);
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert!(config.buttons.copy_md);
        assert!(config.buttons.copy_csv);
        assert_eq!(
            config.markup.container_style,
            "display: grid; grid-template: auto;"
        );
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse("[buttons]\nCopyCsv = false\n").unwrap();
        assert!(config.buttons.copy_md);
        assert!(!config.buttons.copy_csv);
        // Untouched section keeps its defaults
        assert!(config.markup.container_class.is_empty());
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("buttons = 3");
        assert!(matches!(result, Err(CopydownError::Config(_))));
    }

    #[test]
    fn test_merge() {
        let mut config = Config::default();
        let override_config =
            Config::parse("[buttons]\nCopyMd = false\nMdLabel = \"M\"\n").unwrap();
        config.merge(&override_config);
        assert!(!config.buttons.copy_md);
        assert_eq!(config.buttons.md_label, "M");
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config, parsed);
    }
}
