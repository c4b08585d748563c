//! Client-side filtering of search results.

use serde::{Deserialize, Serialize};

use bookfinder_types::BookRecord;

/// Publication year range. Either bound may be open.
///
/// Records without a known year always pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearFilter {
    /// Earliest year, inclusive.
    pub from: Option<i32>,
    /// Latest year, inclusive.
    pub to: Option<i32>,
}

impl YearFilter {
    /// Create a filter with the given bounds.
    pub fn new(from: Option<i32>, to: Option<i32>) -> Self {
        Self { from, to }
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether `book` passes the filter.
    pub fn matches(&self, book: &BookRecord) -> bool {
        let Some(year) = book.first_publish_year else {
            return true;
        };
        if self.from.is_some_and(|from| year < from) {
            return false;
        }
        if self.to.is_some_and(|to| year > to) {
            return false;
        }
        true
    }

    /// Keep only the records that pass.
    pub fn apply(&self, books: Vec<BookRecord>) -> Vec<BookRecord> {
        if self.is_unbounded() {
            return books;
        }
        books.into_iter().filter(|b| self.matches(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(year: Option<i32>) -> BookRecord {
        let mut book = BookRecord::new("/works/OL1W", "Test");
        book.first_publish_year = year;
        book
    }

    #[test]
    fn test_unbounded_passes_everything() {
        let filter = YearFilter::default();
        assert!(filter.is_unbounded());
        assert!(filter.matches(&book(Some(1))));
        assert!(filter.matches(&book(None)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filter = YearFilter::new(Some(1950), Some(1960));
        assert!(filter.matches(&book(Some(1950))));
        assert!(filter.matches(&book(Some(1960))));
        assert!(!filter.matches(&book(Some(1949))));
        assert!(!filter.matches(&book(Some(1961))));
    }

    #[test]
    fn test_unknown_year_passes() {
        let filter = YearFilter::new(Some(2000), None);
        assert!(filter.matches(&book(None)));
    }

    #[test]
    fn test_apply() {
        let filter = YearFilter::new(None, Some(1900));
        let kept = filter.apply(vec![book(Some(1850)), book(Some(1950)), book(None)]);
        assert_eq!(kept.len(), 2);
    }
}
