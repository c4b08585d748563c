//! Config command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;

use bookfinder_core::{CatalogClient, DEFAULT_CATALOG_URL, DEFAULT_LIMIT};

use crate::cli::{ConfigAction, ConfigKey, parse_bool_arg};
use crate::config::{Config, DEFAULT_TIMEOUT_SECS};
use crate::util::write_output;

/// Name of the key as typed on the command line.
fn key_name(key: ConfigKey) -> String {
    key.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_else(|| format!("{:?}", key))
}

fn get_value(config: &Config, key: ConfigKey) -> Option<String> {
    match key {
        ConfigKey::CatalogUrl => config.catalog_url.clone(),
        ConfigKey::PageSize => config.page_size.map(|v| v.to_string()),
        ConfigKey::Timeout => config.timeout.map(|v| v.to_string()),
        ConfigKey::DbPath => config.db_path.as_ref().map(|p| p.display().to_string()),
        ConfigKey::NoColor => Some(config.no_color.to_string()),
        ConfigKey::Format => config.format.clone(),
    }
}

fn set_value(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::CatalogUrl => {
            CatalogClient::new(value).with_context(|| format!("Invalid catalog URL '{}'", value))?;
            config.catalog_url = Some(value.trim_end_matches('/').to_string());
        }
        ConfigKey::PageSize => {
            let size: u32 = value
                .parse()
                .with_context(|| format!("Invalid page size '{}'", value))?;
            if size == 0 {
                bail!("Page size must be at least 1");
            }
            config.page_size = Some(size);
        }
        ConfigKey::Timeout => {
            let secs: u64 = value
                .parse()
                .with_context(|| format!("Invalid timeout '{}'", value))?;
            if secs == 0 {
                bail!("Timeout must be at least 1 second");
            }
            config.timeout = Some(secs);
        }
        ConfigKey::DbPath => config.db_path = Some(PathBuf::from(value)),
        ConfigKey::NoColor => config.no_color = parse_bool_arg(value).map_err(anyhow::Error::msg)?,
        ConfigKey::Format => match value.to_lowercase().as_str() {
            "text" | "json" => config.format = Some(value.to_lowercase()),
            _ => bail!("Invalid format '{}'. Use: text, json", value),
        },
    }
    Ok(())
}

fn unset_value(config: &mut Config, key: ConfigKey) {
    match key {
        ConfigKey::CatalogUrl => config.catalog_url = None,
        ConfigKey::PageSize => config.page_size = None,
        ConfigKey::Timeout => config.timeout = None,
        ConfigKey::DbPath => config.db_path = None,
        ConfigKey::NoColor => config.no_color = false,
        ConfigKey::Format => config.format = None,
    }
}

fn default_value(key: ConfigKey) -> String {
    match key {
        ConfigKey::CatalogUrl => DEFAULT_CATALOG_URL.to_string(),
        ConfigKey::PageSize => DEFAULT_LIMIT.to_string(),
        ConfigKey::Timeout => DEFAULT_TIMEOUT_SECS.to_string(),
        ConfigKey::DbPath => bookfinder_store::default_db_path().display().to_string(),
        ConfigKey::NoColor => "false".to_string(),
        ConfigKey::Format => "text".to_string(),
    }
}

/// Run a config action against the file at `path`.
pub fn run_config(action: ConfigAction, path: &Path) -> Result<String> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_from(path);
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            if content.trim().is_empty() {
                Ok("# No configuration set; defaults are in use\n".to_string())
            } else {
                Ok(content)
            }
        }
        ConfigAction::Get { key } => {
            let config = Config::load_from(path);
            Ok(match get_value(&config, key) {
                Some(value) => format!("{}\n", value),
                None => format!("{} (default)\n", default_value(key)),
            })
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(path);
            set_value(&mut config, key, &value)?;
            config.save_to(path)?;
            Ok(format!("Set {} = {}\n", key_name(key), value))
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load_from(path);
            unset_value(&mut config, key);
            config.save_to(path)?;
            Ok(format!("Unset {}\n", key_name(key)))
        }
        ConfigAction::Path => Ok(format!("{}\n", path.display())),
        ConfigAction::Init => {
            if path.exists() {
                bail!("Config file already exists: {}", path.display());
            }
            let config = Config {
                catalog_url: Some(DEFAULT_CATALOG_URL.to_string()),
                page_size: Some(DEFAULT_LIMIT),
                timeout: Some(DEFAULT_TIMEOUT_SECS),
                ..Default::default()
            };
            config.save_to(path)?;
            Ok(format!("Created {}\n", path.display()))
        }
    }
}

pub fn cmd_config(action: ConfigAction) -> Result<()> {
    let content = run_config(action, &Config::path())?;
    write_output(None, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        (dir, path)
    }

    #[test]
    fn test_get_falls_back_to_default() {
        let (_dir, path) = temp_config();
        let out = run_config(
            ConfigAction::Get {
                key: ConfigKey::PageSize,
            },
            &path,
        )
        .unwrap();
        assert_eq!(out, "20 (default)\n");
    }

    #[test]
    fn test_set_get_unset() {
        let (_dir, path) = temp_config();

        run_config(
            ConfigAction::Set {
                key: ConfigKey::PageSize,
                value: "50".to_string(),
            },
            &path,
        )
        .unwrap();
        assert_eq!(Config::load_from(&path).page_size, Some(50));

        let out = run_config(ConfigAction::Get { key: ConfigKey::PageSize }, &path).unwrap();
        assert_eq!(out, "50\n");

        run_config(ConfigAction::Unset { key: ConfigKey::PageSize }, &path).unwrap();
        assert_eq!(Config::load_from(&path).page_size, None);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let (_dir, path) = temp_config();
        let set = |key, value: &str| {
            run_config(
                ConfigAction::Set {
                    key,
                    value: value.to_string(),
                },
                &path,
            )
        };

        assert!(set(ConfigKey::PageSize, "0").is_err());
        assert!(set(ConfigKey::Timeout, "soon").is_err());
        assert!(set(ConfigKey::CatalogUrl, "ftp://example.org").is_err());
        assert!(set(ConfigKey::Format, "csv").is_err());
        assert!(set(ConfigKey::NoColor, "maybe").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_set_no_color_and_url() {
        let (_dir, path) = temp_config();
        for (key, value) in [
            (ConfigKey::NoColor, "yes"),
            (ConfigKey::CatalogUrl, "http://localhost:8080/"),
        ] {
            run_config(
                ConfigAction::Set {
                    key,
                    value: value.to_string(),
                },
                &path,
            )
            .unwrap();
        }

        let config = Config::load_from(&path);
        assert!(config.no_color);
        assert_eq!(config.catalog_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let (_dir, path) = temp_config();
        let out = run_config(ConfigAction::Init, &path).unwrap();
        assert!(out.starts_with("Created"));
        assert_eq!(Config::load_from(&path).page_size, Some(20));

        assert!(run_config(ConfigAction::Init, &path).is_err());
    }

    #[test]
    fn test_key_name() {
        assert_eq!(key_name(ConfigKey::CatalogUrl), "catalog-url");
        assert_eq!(key_name(ConfigKey::NoColor), "no-color");
    }

    #[test]
    fn test_show_empty() {
        let (_dir, path) = temp_config();
        let out = run_config(ConfigAction::Show, &path).unwrap();
        assert!(out.contains("defaults are in use"));
    }
}
