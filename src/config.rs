// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for accessguard
//!
//! Read from `.accessguard.toml`; every section and field has a default,
//! so an empty or missing file is a valid configuration.

use crate::error::{GuardError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Auto-fix toggles
    #[serde(default)]
    pub fixes: FixesConfig,

    /// File scanning limits and filters
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Which auto-fixes are enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixesConfig {
    /// Add `lang` to the `<html>` language attributes
    pub lang_attr: bool,
    /// Strip headings that contain only whitespace
    pub empty_headings: bool,
    /// Insert screen-reader labels for unlabeled fields
    pub form_labels: bool,
    /// Emit the skip-to-content link
    pub skip_link: bool,
    /// Language tag used by the `lang` fix, e.g. "en-US"
    pub site_language: String,
}

impl Default for FixesConfig {
    fn default() -> Self {
        Self {
            lang_attr: true,
            empty_headings: true,
            form_labels: false,
            skip_link: true,
            site_language: "en-US".to_string(),
        }
    }
}

/// Scanning limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Files larger than this are not parsed
    pub max_input_bytes: u64,
    /// Extensions picked up when scanning a directory
    pub extensions: Vec<String>,
    /// Directory names never descended into
    pub skip_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 2 * 1024 * 1024,
            extensions: vec!["html".to_string(), "htm".to_string(), "xhtml".to_string()],
            skip_dirs: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
                "vendor".to_string(),
            ],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when neither `RUST_LOG` nor `--verbose` is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Load configuration from a path
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Default config path, relative to the working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".accessguard.toml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let content =
        toml::to_string_pretty(&config).map_err(|e| GuardError::Config(e.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.fixes.lang_attr);
        assert!(config.fixes.empty_headings);
        assert!(config.fixes.skip_link);
        assert!(!config.fixes.form_labels);
        assert_eq!(config.fixes.site_language, "en-US");
        assert_eq!(config.scan.max_input_bytes, 2_097_152);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".accessguard.toml");
        std::fs::write(&path, "[fixes]\nform_labels = true\nsite_language = \"fr-FR\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.fixes.form_labels);
        assert!(config.fixes.lang_attr);
        assert_eq!(config.fixes.site_language, "fr-FR");
        assert_eq!(config.scan, ScanConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[fixes\nlang_attr = ").unwrap();
        assert!(matches!(load_config(&path), Err(GuardError::TomlParse(_))));
    }

    #[test]
    fn test_write_then_load_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/.accessguard.toml");
        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }
}
