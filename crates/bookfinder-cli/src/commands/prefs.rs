//! View mode and theme commands.
//!
//! Without a value both commands print the stored preference.

use anyhow::Result;

use bookfinder_store::{Store, StoreEvent};
use bookfinder_types::ViewMode;

use crate::cli::{OutputFormat, ThemeArg};
use crate::format::FormatOptions;
use crate::util::{warn_on_write_error, write_output};

pub fn run_view(
    mode: Option<ViewMode>,
    store: &mut Store,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<String> {
    if let Some(mode) = mode {
        store.set_view_mode(mode);
        warn_on_write_error(store);
    }
    let current = store.view_mode();
    match format {
        OutputFormat::Json => opts.as_json(&serde_json::json!({ "viewMode": current })),
        OutputFormat::Text if mode.is_some() => Ok(format!(
            "{}\n",
            opts.palette.success(&format!("View mode set to {}", current))
        )),
        OutputFormat::Text => Ok(format!("{}\n", current)),
    }
}

/// Apply a theme change and switch the palette to match.
///
/// The palette follows the store's `ThemeChanged` events.
pub fn run_theme(
    theme: Option<ThemeArg>,
    store: &mut Store,
    format: OutputFormat,
    opts: &mut FormatOptions,
) -> Result<String> {
    if let Some(arg) = theme {
        let mut events = store.subscribe();
        match arg {
            ThemeArg::Toggle => {
                store.toggle_theme();
            }
            _ => store.set_theme(arg.resolve(store.theme())),
        }
        warn_on_write_error(store);

        while let Ok(event) = events.try_recv() {
            if let StoreEvent::ThemeChanged { theme } = event {
                opts.palette.set_theme(theme);
            }
        }
    }

    let current = store.theme();
    match format {
        OutputFormat::Json => opts.as_json(&serde_json::json!({ "theme": current })),
        OutputFormat::Text if theme.is_some() => Ok(format!(
            "{}\n",
            opts.palette.success(&format!("Theme set to {}", current))
        )),
        OutputFormat::Text => Ok(format!("{}\n", current)),
    }
}

pub fn cmd_view(
    mode: Option<ViewMode>,
    store: &mut Store,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<()> {
    let content = run_view(mode, store, format, opts)?;
    write_output(None, &content)
}

pub fn cmd_theme(
    theme: Option<ThemeArg>,
    store: &mut Store,
    format: OutputFormat,
    opts: &mut FormatOptions,
) -> Result<()> {
    let content = run_theme(theme, store, format, opts)?;
    write_output(None, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookfinder_types::Theme;

    use crate::style::Palette;

    fn opts() -> FormatOptions {
        FormatOptions::new(ViewMode::Grid, Palette::new(Theme::Light, true))
    }

    #[test]
    fn test_view_show_and_set() {
        let mut store = Store::open_in_memory();
        assert_eq!(run_view(None, &mut store, OutputFormat::Text, &opts()).unwrap(), "grid\n");

        let out = run_view(Some(ViewMode::List), &mut store, OutputFormat::Text, &opts()).unwrap();
        assert_eq!(out, "View mode set to list\n");
        assert_eq!(store.view_mode(), ViewMode::List);
    }

    #[test]
    fn test_view_json() {
        let mut store = Store::open_in_memory();
        let json = run_view(None, &mut store, OutputFormat::Json, &opts()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["viewMode"], "grid");
    }

    #[test]
    fn test_theme_toggle_switches_palette() {
        let mut store = Store::open_in_memory();
        let mut opts = opts();

        let out = run_theme(Some(ThemeArg::Toggle), &mut store, OutputFormat::Text, &mut opts).unwrap();
        assert_eq!(out, "Theme set to dark\n");
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(opts.palette.theme(), Theme::Dark);

        run_theme(Some(ThemeArg::Toggle), &mut store, OutputFormat::Text, &mut opts).unwrap();
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(opts.palette.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_show() {
        let mut store = Store::open_in_memory();
        let mut opts = opts();
        assert_eq!(run_theme(None, &mut store, OutputFormat::Text, &mut opts).unwrap(), "light\n");
    }
}
