//! Output formatting utilities for text and JSON output.

use anyhow::Result;
use serde::Serialize;

use bookfinder_core::SearchPage;
use bookfinder_store::{Store, format_millis};
use bookfinder_types::{BookRecord, FavoriteEntry, ReadingList, RecentSearch, ViewMode};

use crate::style::Palette;

/// Formatting options for output.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Result layout.
    pub view_mode: ViewMode,
    /// Colors for the current theme.
    pub palette: Palette,
}

impl FormatOptions {
    pub fn new(view_mode: ViewMode, palette: Palette) -> Self {
        Self { view_mode, palette }
    }

    /// Serialize value to pretty JSON with a trailing newline.
    pub fn as_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)? + "\n")
    }
}

/// A record together with the user's markers for it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkedBook<'a> {
    #[serde(flatten)]
    book: &'a BookRecord,
    favorite: bool,
    reading_list: Option<ReadingList>,
}

fn mark<'a>(book: &'a BookRecord, store: &Store) -> MarkedBook<'a> {
    MarkedBook {
        book,
        favorite: store.is_favorite(&book.key),
        reading_list: store.reading_list_of(&book.key),
    }
}

fn year_suffix(book: &BookRecord) -> String {
    book.first_publish_year
        .map(|y| format!(" ({})", y))
        .unwrap_or_default()
}

fn display_title(book: &BookRecord) -> &str {
    if book.title.is_empty() {
        "Untitled"
    } else {
        &book.title
    }
}

/// One book in the current layout.
fn format_book(book: &BookRecord, store: &Store, opts: &FormatOptions) -> String {
    let p = &opts.palette;
    let mut markers = String::new();
    if store.is_favorite(&book.key) {
        markers.push(' ');
        markers.push_str(&p.favorite_marker());
    }
    if let Some(list) = store.reading_list_of(&book.key) {
        markers.push(' ');
        markers.push_str(&p.list_tag(list));
    }

    match opts.view_mode {
        ViewMode::List => format!(
            "{}{} by {}{}  {}\n",
            p.title(display_title(book)),
            p.muted(&year_suffix(book)),
            p.accent(&book.author_line()),
            markers,
            p.muted(&book.key),
        ),
        ViewMode::Grid => {
            let mut out = String::new();
            out.push_str(&format!("{}{}\n", p.title(display_title(book)), markers));
            out.push_str(&format!("  {}{}\n", p.accent(&book.author_line()), p.muted(&year_suffix(book))));
            let mut details = Vec::new();
            if let Some(editions) = book.edition_count {
                details.push(format!("{} editions", editions));
            }
            if let Some(pages) = book.median_page_count {
                details.push(format!("{} pages", pages));
            }
            if let Some(isbn) = &book.isbn {
                details.push(format!("ISBN {}", isbn));
            }
            if !details.is_empty() {
                out.push_str(&format!("  {}\n", details.join(" · ")));
            }
            out.push_str(&format!("  {}\n", p.muted(&book.key)));
            out
        }
    }
}

/// Page navigation line, e.g. `Page 4 of 10: 2 3 [4] 5 6`.
pub fn format_pager(page: u32, window: &[u32], total_pages: u32) -> String {
    let links: Vec<String> = window
        .iter()
        .map(|&p| {
            if p == page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    format!("Page {} of {}: {}", page, total_pages, links.join(" "))
}

// ============================================================================
// Search formatting
// ============================================================================

pub fn format_search_text(
    page: &SearchPage,
    shown: &[BookRecord],
    store: &Store,
    opts: &FormatOptions,
) -> String {
    let p = &opts.palette;
    if page.total_count == 0 {
        return "No books found. Try a different title, author or subject.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Found {} books",
        p.accent(&page.total_count.to_string())
    ));
    if shown.len() != page.records.len() {
        out.push_str(&format!(" (showing {} after filters)", shown.len()));
    }
    out.push_str("\n\n");

    for book in shown {
        out.push_str(&format_book(book, store, opts));
        if opts.view_mode == ViewMode::Grid {
            out.push('\n');
        }
    }

    let total_pages = page.total_pages();
    if total_pages > 1 {
        if opts.view_mode == ViewMode::List {
            out.push('\n');
        }
        out.push_str(&p.muted(&format_pager(page.page, &page.page_window(), total_pages)));
        out.push('\n');
    }
    out
}

pub fn format_search_json(
    page: &SearchPage,
    shown: &[BookRecord],
    store: &Store,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct SearchOutput<'a> {
        total_count: u64,
        page: u32,
        total_pages: u32,
        pages: Vec<u32>,
        results: Vec<MarkedBook<'a>>,
    }

    opts.as_json(&SearchOutput {
        total_count: page.total_count,
        page: page.page,
        total_pages: page.total_pages(),
        pages: page.page_window(),
        results: shown.iter().map(|b| mark(b, store)).collect(),
    })
}

// ============================================================================
// Reading list formatting
// ============================================================================

pub fn format_reading_lists_text(
    store: &Store,
    only: Option<ReadingList>,
    opts: &FormatOptions,
) -> String {
    let p = &opts.palette;
    let lists: Vec<ReadingList> = match only {
        Some(list) => vec![list],
        None => ReadingList::ALL.to_vec(),
    };

    if only.is_none() && store.reading_lists().is_empty() {
        return "Your reading lists are empty. Add books with 'bookfinder list add <KEY> <LIST>'.\n"
            .to_string();
    }

    let mut out = String::new();
    for (i, list) in lists.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let entries = store.reading_list(*list);
        out.push_str(&format!(
            "{} ({})\n",
            p.title(&list.to_string()),
            p.accent(&entries.len().to_string())
        ));
        if entries.is_empty() {
            out.push_str(&format!("  {}\n", p.muted("No books in this list")));
            continue;
        }
        for entry in entries {
            out.push_str(&format!(
                "  {}{} by {}  {}  {}\n",
                display_title(&entry.book),
                p.muted(&year_suffix(&entry.book)),
                p.accent(&entry.book.author_line()),
                p.muted(&entry.book.key),
                p.muted(&format!("added {}", format_millis(entry.added_at))),
            ));
        }
    }
    out
}

pub fn format_reading_lists_json(
    store: &Store,
    only: Option<ReadingList>,
    opts: &FormatOptions,
) -> Result<String> {
    match only {
        Some(list) => opts.as_json(&store.reading_list(list)),
        None => opts.as_json(store.reading_lists()),
    }
}

// ============================================================================
// Favorites formatting
// ============================================================================

pub fn format_favorites_text(favorites: &[FavoriteEntry], opts: &FormatOptions) -> String {
    let p = &opts.palette;
    if favorites.is_empty() {
        return "No favorites yet. Add one with 'bookfinder favorite toggle <KEY>'.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})\n",
        p.title("Favorites"),
        p.accent(&favorites.len().to_string())
    ));
    for entry in favorites {
        out.push_str(&format!(
            "  {} {}{} by {}  {}\n",
            p.favorite_marker(),
            display_title(&entry.book),
            p.muted(&year_suffix(&entry.book)),
            p.accent(&entry.book.author_line()),
            p.muted(&entry.book.key),
        ));
    }
    out
}

pub fn format_favorites_json(favorites: &[FavoriteEntry], opts: &FormatOptions) -> Result<String> {
    opts.as_json(&favorites)
}

// ============================================================================
// Recent search formatting
// ============================================================================

pub fn format_recent_searches_text(searches: &[RecentSearch], opts: &FormatOptions) -> String {
    let p = &opts.palette;
    if searches.is_empty() {
        return "No recent searches.\n".to_string();
    }

    let mut out = String::new();
    for (i, search) in searches.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {}  {}\n",
            i + 1,
            p.title(&search.query),
            p.muted(&format_millis(search.timestamp))
        ));
    }
    out
}

pub fn format_recent_searches_json(
    searches: &[RecentSearch],
    opts: &FormatOptions,
) -> Result<String> {
    opts.as_json(&searches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookfinder_store::ManualClock;
    use bookfinder_types::Theme;

    fn plain(view_mode: ViewMode) -> FormatOptions {
        FormatOptions::new(view_mode, Palette::new(Theme::Light, true))
    }

    fn dune() -> BookRecord {
        BookRecord::builder("/works/OL1W")
            .title("Dune")
            .author("Frank Herbert")
            .first_publish_year(1965)
            .edition_count(120)
            .build()
    }

    fn page(records: Vec<BookRecord>, total: u64) -> SearchPage {
        SearchPage {
            total_count: total,
            page: 1,
            limit: 20,
            records,
        }
    }

    #[test]
    fn test_pager() {
        assert_eq!(format_pager(4, &[2, 3, 4, 5, 6], 10), "Page 4 of 10: 2 3 [4] 5 6");
    }

    #[test]
    fn test_search_text_list_mode_with_markers() {
        let mut store = Store::open_in_memory();
        store.toggle_favorite(dune());
        store.assign_to_reading_list(dune(), ReadingList::Completed);

        let records = vec![dune()];
        let text = format_search_text(&page(records.clone(), 1), &records, &store, &plain(ViewMode::List));

        assert!(text.starts_with("Found 1 books"));
        assert!(text.contains("Dune (1965) by Frank Herbert * [done]  /works/OL1W"));
        assert!(!text.contains("Page "));
    }

    #[test]
    fn test_search_text_grid_mode() {
        let store = Store::open_in_memory();
        let records = vec![dune()];
        let text = format_search_text(&page(records.clone(), 45), &records, &store, &plain(ViewMode::Grid));

        assert!(text.contains("Dune\n  Frank Herbert (1965)\n  120 editions\n  /works/OL1W\n"));
        assert!(text.contains("Page 1 of 3: [1] 2 3"));
    }

    #[test]
    fn test_grid_card_lines() {
        let mut store = Store::open_in_memory();
        let book = BookRecord::builder("/works/OL1W")
            .title("Dune")
            .author("Frank Herbert")
            .first_publish_year(1965)
            .edition_count(120)
            .isbn("9780441013593")
            .build();
        store.toggle_favorite(book.clone());

        assert_eq!(
            format_book(&book, &store, &plain(ViewMode::Grid)),
            "Dune *\n  Frank Herbert (1965)\n  120 editions · ISBN 9780441013593\n  /works/OL1W\n"
        );
    }

    #[test]
    fn test_search_text_reports_filtered_count() {
        let store = Store::open_in_memory();
        let records = vec![dune(), BookRecord::new("/works/OL2W", "Other")];
        let shown = vec![dune()];
        let text = format_search_text(&page(records, 2), &shown, &store, &plain(ViewMode::List));
        assert!(text.contains("(showing 1 after filters)"));
    }

    #[test]
    fn test_search_text_no_results() {
        let store = Store::open_in_memory();
        let text = format_search_text(&page(Vec::new(), 0), &[], &store, &plain(ViewMode::Grid));
        assert!(text.starts_with("No books found"));
    }

    #[test]
    fn test_search_json_markers() {
        let mut store = Store::open_in_memory();
        store.assign_to_reading_list(dune(), ReadingList::WantToRead);

        let records = vec![dune()];
        let json = format_search_json(&page(records.clone(), 1), &records, &store, &plain(ViewMode::Grid)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["totalCount"], 1);
        assert_eq!(value["results"][0]["key"], "/works/OL1W");
        assert_eq!(value["results"][0]["favorite"], false);
        assert_eq!(value["results"][0]["readingList"], "wantToRead");
    }

    #[test]
    fn test_reading_lists_text() {
        let mut store = Store::open_in_memory().with_clock(ManualClock::new(0));
        store.assign_to_reading_list(dune(), ReadingList::CurrentlyReading);

        let text = format_reading_lists_text(&store, None, &plain(ViewMode::Grid));
        assert!(text.contains("Want to Read (0)"));
        assert!(text.contains("Currently Reading (1)"));
        assert!(text.contains("added 1970-01-01T00:00:00Z"));

        let text = format_reading_lists_text(&store, Some(ReadingList::Completed), &plain(ViewMode::Grid));
        assert!(text.contains("No books in this list"));
    }

    #[test]
    fn test_empty_reading_lists_hint() {
        let store = Store::open_in_memory();
        let text = format_reading_lists_text(&store, None, &plain(ViewMode::Grid));
        assert!(text.contains("bookfinder list add"));
    }

    #[test]
    fn test_reading_lists_json_single_list() {
        let mut store = Store::open_in_memory();
        store.assign_to_reading_list(dune(), ReadingList::Completed);

        let json = format_reading_lists_json(&store, Some(ReadingList::Completed), &plain(ViewMode::Grid)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["title"], "Dune");
    }

    #[test]
    fn test_favorites_text() {
        let mut store = Store::open_in_memory();
        assert!(format_favorites_text(store.favorites(), &plain(ViewMode::Grid)).starts_with("No favorites"));

        store.toggle_favorite(dune());
        let text = format_favorites_text(store.favorites(), &plain(ViewMode::Grid));
        assert!(text.contains("Favorites (1)"));
        assert!(text.contains("* Dune (1965) by Frank Herbert"));
    }

    #[test]
    fn test_recent_searches_text() {
        let mut store = Store::open_in_memory().with_clock(ManualClock::new(0));
        store.record_search("dune");
        store.record_search("hobbit");

        let text = format_recent_searches_text(store.recent_searches(), &plain(ViewMode::Grid));
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with(" 1. hobbit"));
        assert!(lines[1].starts_with(" 2. dune"));
    }

    #[test]
    fn test_recent_searches_json() {
        let mut store = Store::open_in_memory().with_clock(ManualClock::new(42));
        store.record_search("dune");

        let json = format_recent_searches_json(store.recent_searches(), &plain(ViewMode::Grid)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["query"], "dune");
        assert_eq!(value[0]["timestamp"], 42);
    }
}
