//! Reading list and favorites export.
//!
//! Writes a single list, all lists, or the favorites as pretty-printed JSON
//! or CSV.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use bookfinder_types::{BookRecord, ParseError, ReadingList};

use crate::error::Result;
use crate::store::Store;

/// What to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// A single reading list.
    List(ReadingList),
    /// Every reading list, in declaration order.
    All,
    /// The favorites.
    Favorites,
}

impl ExportScope {
    /// Default file name for this scope and format.
    pub fn default_filename(&self, format: ExportFormat) -> String {
        let stem = match self {
            ExportScope::List(list) => format!("{}-books", list.as_key()),
            ExportScope::All => "all-reading-lists".to_string(),
            ExportScope::Favorites => "favorite-books".to_string(),
        };
        format!("{}.{}", stem, format.extension())
    }
}

impl FromStr for ExportScope {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ExportScope::All),
            "favorites" | "favourites" => Ok(ExportScope::Favorites),
            _ => s.parse().map(ExportScope::List),
        }
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportScope::List(list) => write!(f, "{}", list),
            ExportScope::All => write!(f, "All Reading Lists"),
            ExportScope::Favorites => write!(f, "Favorites"),
        }
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// One exported row: a record and the time it was filed or favorited.
struct Row<'a> {
    book: &'a BookRecord,
    at: i64,
}

fn rows(store: &Store, scope: ExportScope) -> Vec<Row<'_>> {
    match scope {
        ExportScope::List(list) => store
            .reading_list(list)
            .iter()
            .map(|e| Row {
                book: &e.book,
                at: e.added_at,
            })
            .collect(),
        ExportScope::All => store
            .reading_lists()
            .iter()
            .map(|(_, e)| Row {
                book: &e.book,
                at: e.added_at,
            })
            .collect(),
        ExportScope::Favorites => store
            .favorites()
            .iter()
            .map(|e| Row {
                book: &e.book,
                at: e.favorited_at,
            })
            .collect(),
    }
}

/// Write the export for `scope` to any writer.
pub fn write_export<W: Write>(
    store: &Store,
    scope: ExportScope,
    format: ExportFormat,
    writer: W,
) -> Result<()> {
    match format {
        ExportFormat::Json => write_json(store, scope, writer),
        ExportFormat::Csv => write_csv(&rows(store, scope), scope, writer),
    }
}

/// Render the export for `scope` as a string.
pub fn export_to_string(store: &Store, scope: ExportScope, format: ExportFormat) -> Result<String> {
    let mut buf = Vec::new();
    write_export(store, scope, format, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Export `scope` to a file. Returns the number of records written.
pub fn export_to_path(
    store: &Store,
    scope: ExportScope,
    format: ExportFormat,
    path: &Path,
) -> Result<usize> {
    let count = rows(store, scope).len();
    let file = File::create(path)?;
    write_export(store, scope, format, io::BufWriter::new(file))?;
    info!("Exported {} records to {}", count, path.display());
    Ok(count)
}

fn write_json<W: Write>(store: &Store, scope: ExportScope, mut writer: W) -> Result<()> {
    match scope {
        ExportScope::List(list) => serde_json::to_writer_pretty(&mut writer, store.reading_list(list))?,
        ExportScope::All => {
            let all: Vec<_> = store.reading_lists().iter().map(|(_, e)| e).collect();
            serde_json::to_writer_pretty(&mut writer, &all)?
        }
        ExportScope::Favorites => serde_json::to_writer_pretty(&mut writer, store.favorites())?,
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn write_csv<W: Write>(rows: &[Row<'_>], scope: ExportScope, writer: W) -> Result<()> {
    let at_column = match scope {
        ExportScope::Favorites => "favoritedAt",
        _ => "addedAt",
    };

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["key", "title", "authors", "firstPublishYear", at_column])?;
    for row in rows {
        let year = row
            .book
            .first_publish_year
            .map(|y| y.to_string())
            .unwrap_or_default();
        let authors = row.book.authors.join("; ");
        let at = row.at.to_string();
        csv.write_record([
            row.book.key.as_str(),
            row.book.title.as_str(),
            authors.as_str(),
            year.as_str(),
            at.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}
