//! Page window arithmetic shared by every repository backend.
//!
//! Repositories run the count and the windowed fetch, then hand both to
//! [`Page::assemble`] for the metadata. Out-of-range pages are not an
//! error: they produce an empty `docs` with `has_next_page == false`.

use serde::Serialize;

/// Sort order applied to a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    /// Newest first. The default everywhere.
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
}

impl PostSort {
    /// Parse the wire form: `-createdAt` (descending) or `createdAt`.
    /// Anything unrecognized falls back to the default.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("createdAt") => PostSort::CreatedAtAsc,
            _ => PostSort::CreatedAtDesc,
        }
    }
}

/// A validated page request.
///
/// Raw query values that are missing, non-numeric, or below 1 default to
/// page 1 / limit 10 rather than failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
    pub sort: PostSort,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            sort: PostSort::default(),
        }
    }

    /// Build a request from raw query-string values.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(Self::DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(Self::DEFAULT_LIMIT),
            sort: PostSort::from_raw(sort),
        }
    }

    /// Number of records to skip before the window starts.
    ///
    /// Saturates instead of overflowing: `page` and `limit` come straight
    /// from the query string and may both be enormous.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).filter(|n| *n >= 1)
}

/// One page of results plus the metadata the API exposes.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    pub limit: u64,
    pub page: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

impl<T> Page<T> {
    /// Combine a fetched window with the matching total count.
    pub fn assemble(docs: Vec<T>, total_docs: u64, request: PageRequest) -> Self {
        let PageRequest { page, limit, .. } = request;
        let total_pages = total_docs.div_ceil(limit);
        let has_next_page = page < total_pages;
        let has_prev_page = page > 1;

        Self {
            docs,
            total_docs,
            limit,
            page,
            total_pages,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| page + 1),
            prev_page: has_prev_page.then(|| page - 1),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            docs: self.docs.into_iter().map(f).collect(),
            total_docs: self.total_docs,
            limit: self.limit,
            page: self.page,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            has_prev_page: self.has_prev_page,
            next_page: self.next_page,
            prev_page: self.prev_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_for_missing_values() {
        let req = PageRequest::from_raw(None, None, None);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
        assert_eq!(req.sort, PostSort::CreatedAtDesc);
    }

    #[test]
    fn defaults_apply_for_non_numeric_values() {
        let req = PageRequest::from_raw(Some("abc"), Some("ten"), Some("title"));
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
        assert_eq!(req.sort, PostSort::CreatedAtDesc);
    }

    #[test]
    fn defaults_apply_for_zero_and_negative_values() {
        let req = PageRequest::from_raw(Some("0"), Some("-5"), None);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
    }

    #[test]
    fn explicit_values_are_kept() {
        let req = PageRequest::from_raw(Some("3"), Some("25"), Some("createdAt"));
        assert_eq!(req.page, 3);
        assert_eq!(req.limit, 25);
        assert_eq!(req.sort, PostSort::CreatedAtAsc);
        assert_eq!(req.offset(), 50);
    }

    #[test]
    fn offset_saturates_for_huge_page_values() {
        let req = PageRequest::from_raw(Some("18446744073709551615"), Some("10"), None);
        assert_eq!(req.page, u64::MAX);
        assert_eq!(req.offset(), u64::MAX);

        let req = PageRequest::new(u64::MAX, u64::MAX);
        assert_eq!(req.offset(), u64::MAX);
    }

    #[test]
    fn total_pages_is_ceiling_of_count_over_limit() {
        let page = Page::assemble(vec![1, 2, 3], 15, PageRequest::new(1, 10));
        assert_eq!(page.total_pages, 2);

        let page = Page::assemble(vec![1], 20, PageRequest::new(1, 10));
        assert_eq!(page.total_pages, 2);

        let page = Page::assemble(vec![1], 21, PageRequest::new(1, 10));
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn first_page_has_next_but_no_prev() {
        let page = Page::assemble(vec![(); 10], 15, PageRequest::new(1, 10));
        assert!(page.has_next_page);
        assert!(!page.has_prev_page);
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.prev_page, None);
    }

    #[test]
    fn last_page_has_prev_but_no_next() {
        let page = Page::assemble(vec![(); 5], 15, PageRequest::new(2, 10));
        assert!(!page.has_next_page);
        assert!(page.has_prev_page);
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(1));
    }

    #[test]
    fn page_beyond_the_end_is_empty_not_an_error() {
        let page: Page<u8> = Page::assemble(vec![], 15, PageRequest::new(9, 10));
        assert!(page.docs.is_empty());
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next_page);
        assert!(page.has_prev_page);
    }

    #[test]
    fn empty_result_set_has_zero_pages() {
        let page: Page<u8> = Page::assemble(vec![], 0, PageRequest::new(1, 10));
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next_page);
        assert!(!page.has_prev_page);
    }
}
