//! Reading list command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use bookfinder_core::CatalogService;
use bookfinder_store::{ExportFormat, ExportScope, Store, export_to_path};
use bookfinder_types::ReadingList;

use crate::cli::{ListAction, OutputFormat};
use crate::format::{FormatOptions, format_reading_lists_json, format_reading_lists_text};
use crate::util::{normalize_key, resolve_book, warn_on_write_error, write_output};

/// Membership of one book, as printed by `list status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListStatus {
    key: String,
    reading_list: Option<ReadingList>,
    favorite: bool,
}

/// Run a reading list action and return what to print.
pub async fn run_list(
    action: ListAction,
    store: &mut Store,
    catalog: &dyn CatalogService,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<String> {
    let p = &opts.palette;
    match action {
        ListAction::Show { list, .. } => match format {
            OutputFormat::Json => format_reading_lists_json(store, list, opts),
            OutputFormat::Text => Ok(format_reading_lists_text(store, list, opts)),
        },
        ListAction::Add { key, list } => {
            let book = resolve_book(store, &key, catalog).await?;
            let previous = store.reading_list_of(&book.key);
            let title = book.title.clone();
            store.assign_to_reading_list(book, list);
            warn_on_write_error(store);

            let message = match previous {
                Some(prev) if prev == list => format!("'{}' is already on {}", title, list),
                Some(prev) => format!("Moved '{}' from {} to {}", title, prev, list),
                None => format!("Added '{}' to {}", title, list),
            };
            Ok(format!("{}\n", p.success(&message)))
        }
        ListAction::Remove { key, list } => {
            let key = normalize_key(&key)?;
            if store.remove_from_reading_list(&key, list) {
                warn_on_write_error(store);
                Ok(format!("{}\n", p.success(&format!("Removed {} from {}", key, list))))
            } else {
                Ok(format!("{} is not on {}\n", key, list))
            }
        }
        ListAction::Status { key } => {
            let key = normalize_key(&key)?;
            let status = ListStatus {
                reading_list: store.reading_list_of(&key),
                favorite: store.is_favorite(&key),
                key,
            };
            match format {
                OutputFormat::Json => opts.as_json(&status),
                OutputFormat::Text => Ok(match status.reading_list {
                    Some(list) => format!("{}: {}\n", status.key, list),
                    None => format!("{}: not on any reading list\n", status.key),
                }),
            }
        }
        ListAction::Export {
            scope,
            format: export_format,
            output,
        } => {
            let export_format: ExportFormat = export_format.into();
            let path = output.unwrap_or_else(|| default_export_path(scope, export_format));
            let count = export_to_path(store, scope, export_format, &path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            Ok(format!(
                "{}\n",
                p.success(&format!(
                    "Exported {} {} to {}",
                    count,
                    if count == 1 { "book" } else { "books" },
                    path.display()
                ))
            ))
        }
    }
}

fn default_export_path(scope: ExportScope, format: ExportFormat) -> PathBuf {
    PathBuf::from(scope.default_filename(format))
}

pub async fn cmd_list(
    action: ListAction,
    store: &mut Store,
    catalog: &dyn CatalogService,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<()> {
    let content = run_list(action, store, catalog, format, opts).await?;
    write_output(None, &content)
}
