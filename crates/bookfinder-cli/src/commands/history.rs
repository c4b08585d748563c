//! Recent search command implementation.

use anyhow::Result;

use bookfinder_store::Store;

use crate::cli::{HistoryAction, OutputFormat};
use crate::format::{FormatOptions, format_recent_searches_json, format_recent_searches_text};
use crate::util::{warn_on_write_error, write_output};

pub fn run_history(
    action: Option<HistoryAction>,
    store: &mut Store,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<String> {
    match action {
        None | Some(HistoryAction::Show { .. }) => match format {
            OutputFormat::Json => format_recent_searches_json(store.recent_searches(), opts),
            OutputFormat::Text => Ok(format_recent_searches_text(store.recent_searches(), opts)),
        },
        Some(HistoryAction::Clear) => {
            let count = store.recent_searches().len();
            store.clear_recent_searches();
            warn_on_write_error(store);
            Ok(format!(
                "{}\n",
                opts.palette
                    .success(&format!("Cleared {} recent searches", count))
            ))
        }
    }
}

pub fn cmd_history(
    action: Option<HistoryAction>,
    store: &mut Store,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<()> {
    let content = run_history(action, store, format, opts)?;
    write_output(None, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookfinder_types::{Theme, ViewMode};

    use crate::style::Palette;

    fn opts() -> FormatOptions {
        FormatOptions::new(ViewMode::Grid, Palette::new(Theme::Light, true))
    }

    #[test]
    fn test_show_defaults_to_list() {
        let mut store = Store::open_in_memory();
        store.record_search("dune");
        store.record_search("hobbit");
        store.record_search("dune");

        let out = run_history(None, &mut store, OutputFormat::Text, &opts()).unwrap();
        let queries: Vec<_> = out
            .lines()
            .map(|l| l.split_whitespace().nth(1).unwrap_or_default())
            .collect();
        assert_eq!(queries, ["dune", "hobbit"]);
    }

    #[test]
    fn test_clear() {
        let mut store = Store::open_in_memory();
        store.record_search("dune");

        let out = run_history(Some(HistoryAction::Clear), &mut store, OutputFormat::Text, &opts()).unwrap();
        assert_eq!(out, "Cleared 1 recent searches\n");
        assert!(store.recent_searches().is_empty());
    }
}
