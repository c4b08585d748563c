//! Search command implementation.

use anyhow::{Context, Result, bail};
use tracing::debug;

use bookfinder_core::{CatalogService, SearchRequest, YearFilter};
use bookfinder_store::Store;

use crate::cli::{OutputFormat, SearchArgs};
use crate::format::{FormatOptions, format_search_json, format_search_text};
use crate::util::{warn_on_write_error, write_output};

/// Build the catalog request from the command line.
pub fn build_request(args: &SearchArgs, limit: u32) -> SearchRequest {
    let mut request = SearchRequest::new(args.query.trim())
        .page(args.page)
        .limit(limit);
    if let Some(author) = &args.author {
        request = request.author(author.trim());
    }
    if let Some(subject) = &args.subject {
        request = request.subject(subject.trim());
    }
    request
}

/// Run a search and render the results.
///
/// A non-blank free-text query is recorded in the recent-search log before
/// the catalog is asked, so it is kept even if the request fails.
pub async fn run_search(
    catalog: &dyn CatalogService,
    store: &mut Store,
    request: &SearchRequest,
    years: YearFilter,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<String> {
    if request.is_empty() {
        bail!("Nothing to search for. Give a query, --author or --subject.");
    }

    store.record_search(&request.query);
    warn_on_write_error(store);

    debug!("Searching catalog for \"{}\"", request.compose_query());
    let page = catalog
        .search(request)
        .await
        .context("Search failed")?;

    let shown = years.apply(page.records.clone());

    match format {
        OutputFormat::Json => format_search_json(&page, &shown, store, opts),
        OutputFormat::Text => Ok(format_search_text(&page, &shown, store, opts)),
    }
}

pub async fn cmd_search(
    catalog: &dyn CatalogService,
    store: &mut Store,
    args: &SearchArgs,
    limit: u32,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<()> {
    let request = build_request(args, limit);
    let years = YearFilter::new(args.year_from, args.year_to);
    let content = run_search(catalog, store, &request, years, format, opts).await?;
    write_output(None, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookfinder_core::MockCatalog;
    use bookfinder_types::{BookRecord, Theme, ViewMode};

    use crate::style::Palette;

    fn opts() -> FormatOptions {
        FormatOptions::new(ViewMode::List, Palette::new(Theme::Light, true))
    }

    fn catalog() -> MockCatalog {
        MockCatalog::with_records(vec![
            BookRecord::builder("/works/OL1W")
                .title("Dune")
                .author("Frank Herbert")
                .first_publish_year(1965)
                .build(),
            BookRecord::builder("/works/OL2W")
                .title("Dune Messiah")
                .author("Frank Herbert")
                .first_publish_year(1969)
                .build(),
        ])
    }

    fn args(query: &str) -> SearchArgs {
        SearchArgs {
            query: query.to_string(),
            author: None,
            subject: None,
            page: 1,
            limit: None,
            year_from: None,
            year_to: None,
        }
    }

    #[test]
    fn test_build_request() {
        let mut a = args("  dune ");
        a.author = Some(" Herbert ".to_string());
        let request = build_request(&a, 5);
        assert_eq!(request.query, "dune");
        assert_eq!(request.author, "Herbert");
        assert_eq!(request.limit, 5);
        assert_eq!(request.page, 1);
    }

    #[tokio::test]
    async fn test_search_records_query() {
        let catalog = catalog();
        let mut store = Store::open_in_memory();
        let request = build_request(&args("dune"), 20);

        let text = run_search(&catalog, &mut store, &request, YearFilter::default(), OutputFormat::Text, &opts())
            .await
            .unwrap();

        assert!(text.starts_with("Found 2 books"));
        assert_eq!(store.recent_searches()[0].query, "dune");
    }

    #[tokio::test]
    async fn test_search_year_filter() {
        let catalog = catalog();
        let mut store = Store::open_in_memory();
        let request = build_request(&args("dune"), 20);

        let json = run_search(
            &catalog,
            &mut store,
            &request,
            YearFilter::new(None, Some(1966)),
            OutputFormat::Json,
            &opts(),
        )
        .await
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalCount"], 2);
        assert_eq!(value["results"].as_array().unwrap().len(), 1);
        assert_eq!(value["results"][0]["title"], "Dune");
    }

    #[tokio::test]
    async fn test_empty_search_is_rejected() {
        let catalog = catalog();
        let mut store = Store::open_in_memory();
        let request = build_request(&args("   "), 20);

        let result = run_search(&catalog, &mut store, &request, YearFilter::default(), OutputFormat::Text, &opts()).await;

        assert!(result.is_err());
        assert_eq!(catalog.request_count(), 0);
        assert!(store.recent_searches().is_empty());
    }

    #[tokio::test]
    async fn test_author_only_search_is_not_recorded() {
        let catalog = catalog();
        let mut store = Store::open_in_memory();
        let mut a = args("");
        a.author = Some("Herbert".to_string());

        let request = build_request(&a, 20);
        run_search(&catalog, &mut store, &request, YearFilter::default(), OutputFormat::Text, &opts())
            .await
            .unwrap();

        assert!(store.recent_searches().is_empty());
    }

    #[tokio::test]
    async fn test_failed_search_keeps_history() {
        let catalog = catalog();
        catalog.set_should_fail(true, Some("down")).await;
        let mut store = Store::open_in_memory();
        let request = build_request(&args("dune"), 20);

        let result = run_search(&catalog, &mut store, &request, YearFilter::default(), OutputFormat::Text, &opts()).await;

        assert!(result.is_err());
        assert_eq!(store.recent_searches().len(), 1);
    }
}
