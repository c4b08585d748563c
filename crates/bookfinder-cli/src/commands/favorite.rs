//! Favorite command implementation.

use anyhow::Result;

use bookfinder_core::CatalogService;
use bookfinder_store::Store;

use crate::cli::{FavoriteAction, OutputFormat};
use crate::format::{FormatOptions, format_favorites_json, format_favorites_text};
use crate::util::{normalize_key, resolve_book, warn_on_write_error, write_output};

pub async fn run_favorite(
    action: FavoriteAction,
    store: &mut Store,
    catalog: &dyn CatalogService,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<String> {
    let p = &opts.palette;
    match action {
        FavoriteAction::Show { .. } => match format {
            OutputFormat::Json => format_favorites_json(store.favorites(), opts),
            OutputFormat::Text => Ok(format_favorites_text(store.favorites(), opts)),
        },
        FavoriteAction::Toggle { key } => {
            let book = resolve_book(store, &key, catalog).await?;
            let title = book.title.clone();
            let added = store.toggle_favorite(book);
            warn_on_write_error(store);

            let message = if added {
                format!("Added '{}' to favorites", title)
            } else {
                format!("Removed '{}' from favorites", title)
            };
            Ok(format!("{}\n", p.success(&message)))
        }
        FavoriteAction::Check { key } => {
            let key = normalize_key(&key)?;
            let favorite = store.is_favorite(&key);
            match format {
                OutputFormat::Json => opts.as_json(&serde_json::json!({
                    "key": key,
                    "favorite": favorite,
                })),
                OutputFormat::Text => Ok(if favorite {
                    format!("{} {} is a favorite\n", p.favorite_marker(), key)
                } else {
                    format!("{} is not a favorite\n", key)
                }),
            }
        }
    }
}

pub async fn cmd_favorite(
    action: FavoriteAction,
    store: &mut Store,
    catalog: &dyn CatalogService,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<()> {
    let content = run_favorite(action, store, catalog, format, opts).await?;
    write_output(None, &content)
}
