//! Client-side pagination over an already-filtered row set.

#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<T> {
    pub page_rows: Vec<T>,
    /// Offset of the first row of the page within the full set.
    pub start: usize,
    pub total_pages: usize,
    /// Requested page clamped into `[1, total_pages]`.
    pub current_page: usize,
}

/// At least one page even when there are no rows, so the controls
/// always have something to stand on.
pub fn total_pages(total_rows: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 1;
    }
    total_rows.div_ceil(rows_per_page).max(1)
}

pub fn paginate<T: Clone>(rows: &[T], page: usize, rows_per_page: usize) -> PageSlice<T> {
    let total_pages = total_pages(rows.len(), rows_per_page);
    let current_page = page.clamp(1, total_pages);
    let start = (current_page - 1) * rows_per_page;
    let end = (start + rows_per_page).min(rows.len());
    let page_rows = if start >= rows.len() {
        Vec::new()
    } else {
        rows[start..end].to_vec()
    };
    PageSlice {
        page_rows,
        start,
        total_pages,
        current_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_still_has_one_page() {
        let slice = paginate::<u32>(&[], 1, 25);
        assert_eq!(slice.total_pages, 1);
        assert_eq!(slice.current_page, 1);
        assert!(slice.page_rows.is_empty());
        assert_eq!(slice.start, 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 25), 1);
        assert_eq!(total_pages(25, 25), 1);
        assert_eq!(total_pages(26, 25), 2);
        assert_eq!(total_pages(500, 25), 20);
    }

    #[test]
    fn test_page_clamped_into_range() {
        let rows: Vec<u32> = (0..30).collect();
        let slice = paginate(&rows, 99, 25);
        assert_eq!(slice.current_page, 2);
        assert_eq!(slice.page_rows.len(), 5);
        assert_eq!(slice.start, 25);

        let slice = paginate(&rows, 0, 25);
        assert_eq!(slice.current_page, 1);
        assert_eq!(slice.page_rows.len(), 25);
    }

    #[test]
    fn test_slice_contents() {
        let rows: Vec<u32> = (1..=7).collect();
        let slice = paginate(&rows, 2, 3);
        assert_eq!(slice.page_rows, vec![4, 5, 6]);
        assert_eq!(slice.start, 3);
        assert_eq!(slice.total_pages, 3);
    }
}
