use serde::Serialize;

/// Resolved paging bounds for one list request, computed from the row count
/// BEFORE the data query runs so the OFFSET never points past the last page.
#[derive(Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub page_index: i64,
    pub total_pages: i64,
    pub offset: i64,
    pub limit: i64,
}

impl PageWindow {
    /// Clamp a requested 1-based page index against the filtered row count.
    ///
    /// An empty result set still produces one page (showing zero rows), so
    /// `total_pages` is never below 1. Out-of-range requests land on the
    /// nearest boundary page.
    pub fn resolve(total_rows: i64, requested_page: i64, page_size: i64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = ((total_rows + page_size - 1) / page_size).max(1);
        let page_index = requested_page.clamp(1, total_pages);

        PageWindow {
            page_index,
            total_pages,
            offset: (page_index - 1) * page_size,
            limit: page_size,
        }
    }
}

/// One materialized page of a filtered/sorted result set.
#[derive(Debug, Serialize)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub page_index: i64,
    pub total_pages: i64,
}

impl<T> PaginatedList<T> {
    pub fn new(items: Vec<T>, window: &PageWindow) -> Self {
        PaginatedList {
            items,
            page_index: window.page_index,
            total_pages: window.total_pages,
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_set_yields_one_empty_page() {
        let w = PageWindow::resolve(0, 1, 5);
        assert_eq!(w.page_index, 1);
        assert_eq!(w.total_pages, 1);
        assert_eq!(w.offset, 0);
    }

    #[test]
    fn page_index_clamps_to_boundaries() {
        // 3 rows, page size 2 -> 2 pages
        let below = PageWindow::resolve(3, 0, 2);
        assert_eq!(below.page_index, 1);

        let above = PageWindow::resolve(3, 99, 2);
        assert_eq!(above.page_index, 2);
        assert_eq!(above.offset, 2);

        let negative = PageWindow::resolve(3, -7, 2);
        assert_eq!(negative.page_index, 1);
    }

    #[test]
    fn total_pages_is_ceiling_of_rows_over_page_size() {
        assert_eq!(PageWindow::resolve(10, 1, 5).total_pages, 2);
        assert_eq!(PageWindow::resolve(11, 1, 5).total_pages, 3);
        assert_eq!(PageWindow::resolve(5, 1, 5).total_pages, 1);
    }

    #[test]
    fn offset_and_limit_cover_the_requested_page() {
        let w = PageWindow::resolve(7, 2, 3);
        assert_eq!(w.offset, 3);
        assert_eq!(w.limit, 3);
        // last page holds the single remaining row; LIMIT stays page_size
        let last = PageWindow::resolve(7, 3, 3);
        assert_eq!(last.offset, 6);
    }

    #[test]
    fn previous_and_next_flags_track_the_window() {
        let first = PaginatedList::new(vec![1, 2], &PageWindow::resolve(3, 1, 2));
        assert!(!first.has_previous_page());
        assert!(first.has_next_page());

        let last = PaginatedList::new(vec![3], &PageWindow::resolve(3, 2, 2));
        assert!(last.has_previous_page());
        assert!(!last.has_next_page());
    }
}
