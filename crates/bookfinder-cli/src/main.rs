mod cli;
mod commands;
mod config;
mod format;
mod style;
mod util;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, FavoriteAction, HistoryAction, ListAction};
use crate::commands::{
    cmd_config, cmd_favorite, cmd_history, cmd_list, cmd_search, cmd_theme, cmd_view,
};
use crate::config::{Config, resolve_format, resolve_page_size};
use crate::format::FormatOptions;
use crate::style::Palette;
use crate::util::{catalog_client, open_store};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "bookfinder", &mut io::stdout());
        return Ok(());
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();

    // Config commands never touch the store
    if let Commands::Config { action } = cli.command {
        return cmd_config(action);
    }

    let mut store = open_store(cli.db.clone(), cli.ephemeral, &config)?;
    let no_color = cli.no_color || config.no_color;
    let mut opts = FormatOptions::new(store.view_mode(), Palette::new(store.theme(), no_color));
    let default_format = resolve_format(cli.json, None, &config);

    match cli.command {
        Commands::Search { search, output } => {
            let format = resolve_format(cli.json, output.format, &config);
            let limit = resolve_page_size(search.limit, &config);
            let catalog = catalog_client(&config)?;
            cmd_search(&catalog, &mut store, &search, limit, format, &opts).await?;
        }
        Commands::List { action } => {
            let format = match &action {
                ListAction::Show { output, .. } => resolve_format(cli.json, output.format, &config),
                _ => default_format,
            };
            let catalog = catalog_client(&config)?;
            cmd_list(action, &mut store, &catalog, format, &opts).await?;
        }
        Commands::Favorite { action } => {
            let format = match &action {
                FavoriteAction::Show { output } => resolve_format(cli.json, output.format, &config),
                _ => default_format,
            };
            let catalog = catalog_client(&config)?;
            cmd_favorite(action, &mut store, &catalog, format, &opts).await?;
        }
        Commands::History { action } => {
            let format = match &action {
                Some(HistoryAction::Show { output }) => {
                    resolve_format(cli.json, output.format, &config)
                }
                _ => default_format,
            };
            cmd_history(action, &mut store, format, &opts)?;
        }
        Commands::View { mode } => {
            cmd_view(mode, &mut store, default_format, &opts)?;
        }
        Commands::Theme { theme } => {
            cmd_theme(theme, &mut store, default_format, &mut opts)?;
        }
        Commands::Config { .. } | Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
