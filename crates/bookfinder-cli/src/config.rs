//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use bookfinder_core::{DEFAULT_CATALOG_URL, DEFAULT_LIMIT};

use crate::cli::OutputFormat;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_url: Option<String>,

    /// Results per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Database file for favorites, reading lists and preferences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    /// Disable colored output
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_color: bool,

    /// Default output format ("text" or "json")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bookfinder")
            .join("config.toml")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load from `path`, falling back to defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

pub fn resolve_catalog_url(config: &Config) -> String {
    config
        .catalog_url
        .clone()
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string())
}

pub fn resolve_page_size(cmd_limit: Option<u32>, config: &Config) -> u32 {
    cmd_limit.or(config.page_size).unwrap_or(DEFAULT_LIMIT)
}

pub fn resolve_timeout(config: &Config) -> Duration {
    Duration::from_secs(config.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))
}

/// Database location: `--db` / `BOOKFINDER_DB`, then the config file, then
/// the platform default.
pub fn resolve_db_path(cmd_db: Option<PathBuf>, config: &Config) -> PathBuf {
    cmd_db
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(bookfinder_store::default_db_path)
}

/// Output format: `--json`, then `--format`, then the config file.
pub fn resolve_format(json: bool, cmd_format: Option<OutputFormat>, config: &Config) -> OutputFormat {
    if json {
        return OutputFormat::Json;
    }
    if let Some(format) = cmd_format {
        return format;
    }
    match config.format.as_deref().map(str::to_lowercase).as_deref() {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}
