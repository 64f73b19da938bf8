//! Pagination helpers.
//!
//! SQL listings clamp `limit`/`offset` with [`clamp_limit`] and
//! [`clamp_offset`]; in-memory lists are sliced with [`paginate`].

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 200;

/// Clamp a requested SQL `LIMIT` to `1..=MAX_LIMIT`, defaulting to [`DEFAULT_LIMIT`].
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested SQL `OFFSET` to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Number of pages needed for `total` items. Zero items still yield one page.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}

/// One page of an in-memory list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Slice `items` into the 1-based `page` of size `per_page`.
///
/// Page numbers below 1 are treated as 1 and numbers past the end are
/// clamped to the last page.
///
/// ```
/// use lms_core::pagination::paginate;
///
/// let page = paginate(&[1, 2, 3, 4, 5], 2, 2);
/// assert_eq!(page.items, vec![3, 4]);
/// assert_eq!(page.total_pages, 3);
/// ```
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let pages = total_pages(total, per_page);
    let page = page.clamp(1, pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total);
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        per_page,
        total,
        total_pages: pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_bounds() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), MAX_LIMIT);
        assert_eq!(clamp_limit(Some(25)), 25);
    }

    #[test]
    fn offset_is_non_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-5)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    #[test]
    fn last_page_is_partial() {
        let page = paginate(&[1, 2, 3, 4, 5], 3, 2);
        assert_eq!(page.items, vec![5]);
        assert_eq!(page.page, 3);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items = [1, 2, 3];
        assert_eq!(paginate(&items, 0, 2).page, 1);
        let past_end = paginate(&items, 9, 2);
        assert_eq!(past_end.page, 2);
        assert_eq!(past_end.items, vec![3]);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let page = paginate::<u8>(&[], 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
    }
}
