//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use bookfinder_core::{CatalogClient, CatalogService};
use bookfinder_store::Store;
use bookfinder_types::BookRecord;

use crate::config::{Config, resolve_catalog_url, resolve_db_path, resolve_timeout};

/// Open the personalization store for this run.
///
/// `--ephemeral` keeps everything in memory; otherwise the database path comes
/// from `--db`, the config file, then the platform default.
pub fn open_store(db: Option<PathBuf>, ephemeral: bool, config: &Config) -> Result<Store> {
    if ephemeral {
        debug!("Using in-memory store");
        return Ok(Store::open_in_memory());
    }
    let path = resolve_db_path(db, config);
    Store::open(&path).with_context(|| format!("Failed to open database: {}", path.display()))
}

/// Build a catalog client from the config file.
pub fn catalog_client(config: &Config) -> Result<CatalogClient> {
    let url = resolve_catalog_url(config);
    let client = CatalogClient::with_timeout(&url, resolve_timeout(config))
        .with_context(|| format!("Invalid catalog URL: {}", url))?;
    Ok(client)
}

/// Resolve a catalog key to a full record.
///
/// Books the user already saved are taken from the store, so toggling and
/// moving them works offline. Anything else is looked up in the catalog.
pub async fn resolve_book(
    store: &Store,
    key: &str,
    catalog: &dyn CatalogService,
) -> Result<BookRecord> {
    let key = normalize_key(key)?;
    if let Some(book) = store.find_book(&key) {
        debug!("Found {} in the local store", key);
        return Ok(book.clone());
    }

    let book = catalog
        .require(&key)
        .await
        .with_context(|| format!("Failed to look up {}", key))?;
    Ok(book)
}

/// Accept `OL45883W` as shorthand for `/works/OL45883W`.
pub fn normalize_key(key: &str) -> Result<String> {
    let key = key.trim();
    if key.is_empty() {
        bail!("Book key must not be empty. Use a catalog key such as /works/OL45883W");
    }
    if key.starts_with('/') {
        Ok(key.to_string())
    } else {
        Ok(format!("/works/{}", key))
    }
}

/// Report a failed write-through without failing the command.
///
/// The change is still applied for this run; it just was not saved.
pub fn warn_on_write_error(store: &Store) {
    if let Some(err) = store.last_write_error() {
        eprintln!("Warning: changes could not be saved: {}", err);
    }
}

/// Write output to file or stdout
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}
