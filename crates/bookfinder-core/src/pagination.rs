//! Page arithmetic for search results.

/// Maximum number of page links shown at once.
pub const PAGE_WINDOW: u32 = 5;

/// Number of pages needed for `total` results at `limit` per page.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Page numbers to offer around `page`.
///
/// Up to five pages: the first five near the start, the last five near the
/// end, otherwise two either side of `page`.
pub fn page_window(page: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= PAGE_WINDOW {
        return (1..=total_pages).collect();
    }

    let start = if page <= 3 {
        1
    } else if page >= total_pages - 2 {
        total_pages - 4
    } else {
        page - 2
    };
    (start..start + PAGE_WINDOW).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(1234, 20), 62);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn test_window_few_pages() {
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(2, 5), vec![1, 2, 3, 4, 5]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_window_near_start() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 10), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_near_end() {
        assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_window_middle() {
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(4, 6), vec![2, 3, 4, 5, 6]);
    }

    proptest! {
        #[test]
        fn prop_window_contains_page(total in 1u32..500, offset in 0u32..500) {
            let page = offset % total + 1;
            let window = page_window(page, total);
            prop_assert!(window.contains(&page));
            prop_assert_eq!(window.len() as u32, total.min(PAGE_WINDOW));
            prop_assert!(window.iter().all(|p| (1..=total).contains(p)));
        }
    }
}
