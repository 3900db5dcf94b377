//! Page requests and page envelopes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of items returned per page when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 12;

/// Upper bound on `limit` accepted from callers.
pub const MAX_LIMIT: u32 = 100;

/// Validation failures raised by [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("limit must be at least 1")]
    ZeroLimit,
    /// The limit exceeded [`MAX_LIMIT`].
    #[error("limit must be at most {max}")]
    LimitTooLarge {
        /// The enforced maximum.
        max: u32,
    },
}

/// One-based page number plus page size.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 10).expect("valid request");
/// assert_eq!(request.offset(), 20);
///
/// let parsed: Result<PageRequest, _> = serde_json::from_str(r#"{"page":0,"limit":10}"#);
/// assert!(parsed.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

/// Deserialised fields awaiting [`PageRequest::new`].
#[derive(Deserialize)]
struct UncheckedPageRequest {
    page: u32,
    limit: u32,
}

impl TryFrom<UncheckedPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(unchecked: UncheckedPageRequest) -> Result<Self, Self::Error> {
        Self::new(unchecked.page, unchecked.limit)
    }
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` or `limit` is zero, or when
    /// `limit` exceeds [`MAX_LIMIT`].
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        if limit > MAX_LIMIT {
            return Err(PageRequestError::LimitTooLarge { max: MAX_LIMIT });
        }
        Ok(Self { page, limit })
    }

    /// First page with the default limit.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1).saturating_mul(self.limit as u64)
    }

    /// The request for the page that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            limit: self.limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Number of pages needed to hold `total_items` at `limit` items per page.
///
/// # Examples
/// ```
/// use pagination::total_pages;
///
/// assert_eq!(total_pages(0, 12), 0);
/// assert_eq!(total_pages(12, 12), 1);
/// assert_eq!(total_pages(13, 12), 2);
/// ```
#[must_use]
pub fn total_pages(total_items: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = total_items.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// One page of results with enough metadata to continue paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in the order the source produced them.
    pub items: Vec<T>,
    /// One-based page number that was requested.
    pub current_page: u32,
    /// Total number of pages available for the same query.
    pub total_pages: u32,
    /// Total number of items across every page.
    pub total_items: u64,
}

impl<T> Page<T> {
    /// Assemble a page from the items loaded for `request` and the total
    /// matching item count.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            current_page: request.page(),
            total_pages: total_pages(total_items, request.limit()),
            total_items,
        }
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Transform every item while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page requests and envelopes.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 12, PageRequestError::ZeroPage)]
    #[case(1, 0, PageRequestError::ZeroLimit)]
    #[case(1, MAX_LIMIT + 1, PageRequestError::LimitTooLarge { max: MAX_LIMIT })]
    fn rejects_invalid_requests(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    #[case::zero_page(r#"{"page":0,"limit":12}"#, "page must be at least 1")]
    #[case::zero_limit(r#"{"page":1,"limit":0}"#, "limit must be at least 1")]
    #[case::huge_limit(r#"{"page":1,"limit":5000}"#, "limit must be at most 100")]
    fn deserialising_applies_the_same_checks(#[case] json: &str, #[case] reason: &str) {
        let err = serde_json::from_str::<PageRequest>(json).expect_err("rejected");
        assert!(err.to_string().contains(reason), "unexpected error: {err}");
    }

    #[rstest]
    fn valid_requests_survive_serde() {
        let request = PageRequest::new(3, 25).expect("valid request");
        let json = serde_json::to_string(&request).expect("serialise");
        assert_eq!(json, r#"{"page":3,"limit":25}"#);
        assert_eq!(serde_json::from_str::<PageRequest>(&json).ok(), Some(request));
    }

    #[rstest]
    #[case(1, 12, 0)]
    #[case(2, 12, 12)]
    #[case(5, 100, 400)]
    fn offset_skips_preceding_pages(#[case] page: u32, #[case] limit: u32, #[case] offset: u64) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    #[case(0, 12, 0)]
    #[case(1, 12, 1)]
    #[case(24, 12, 2)]
    #[case(25, 12, 3)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] limit: u32, #[case] expected: u32) {
        assert_eq!(total_pages(total, limit), expected);
    }

    #[rstest]
    fn page_beyond_the_end_is_empty_but_valid() {
        let request = PageRequest::new(4, 12).expect("valid request");
        let page: Page<u8> = Page::new(Vec::new(), request, 25);
        assert_eq!(page.current_page, 4);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next());
    }

    #[rstest]
    fn page_serialises_in_camel_case() {
        let page = Page::new(vec![1_u8], PageRequest::first(), 13);
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(value["currentPage"], 1);
        assert_eq!(value["totalPages"], 2);
        assert_eq!(value["totalItems"], 13);
    }

    #[rstest]
    fn map_preserves_metadata() {
        let page = Page::new(vec![1_u8, 2], PageRequest::first(), 2).map(u32::from);
        assert_eq!(page.items, vec![1_u32, 2]);
        assert_eq!(page.total_pages, 1);
    }
}
