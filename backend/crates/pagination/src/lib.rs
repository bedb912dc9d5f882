//! Offset pagination primitives shared by listing endpoints.
//!
//! A [`PageRequest`] is a validated, one-based page number plus a page size.
//! It converts to the `OFFSET`/`LIMIT` pair a repository applies to its query.
//! A [`Page`] wraps the rows returned for a request together with the total
//! row count so templates can render previous/next navigation.
//!
//! # Examples
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(3, 10).expect("valid request");
//! assert_eq!(request.offset(), 20);
//! assert_eq!(request.limit(), 10);
//!
//! let page = Page::new(vec!["a", "b"], request, 22);
//! assert_eq!(page.total_pages(), 3);
//! assert!(!page.has_next());
//! ```

use serde::Serialize;

/// Number of rows rendered per page when callers do not choose a size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound accepted for a page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validation failures raised by [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// A page must hold at least one row.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The requested page size exceeds [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}")]
    PageSizeTooLarge {
        /// Largest accepted page size.
        max: u32,
    },
}

/// Validated one-based page request.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= page_size <= MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate a page number and page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when the page is zero or the size is out
    /// of range.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(PageRequestError::PageSizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, page_size })
    }

    /// Validate a page number using [`DEFAULT_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPage`] when `page` is zero.
    pub const fn with_default_size(page: u32) -> Result<Self, PageRequestError> {
        Self::new(page, DEFAULT_PAGE_SIZE)
    }

    /// The first page at the default size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows skipped before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    /// Maximum number of rows on this page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Rows returned for a [`PageRequest`] plus the size of the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    #[serde(flatten)]
    request: PageRequest,
    total: u64,
}

impl<T> Page<T> {
    /// Wrap the rows fetched for `request`; `total` counts every matching row.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            request,
            total,
        }
    }

    /// Rows on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its rows.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The request this page answers.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.request.page()
    }

    /// Total number of rows across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages needed to show `total` rows; zero when nothing matched.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.request.page_size() as u64)
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.request.page() > 1
    }

    /// Whether rows remain after this page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.request.offset() + (self.request.page_size() as u64) < self.total
    }

    /// Number of the previous page, if any.
    #[must_use]
    pub const fn previous_page(&self) -> Option<u32> {
        if self.has_previous() {
            Some(self.request.page() - 1)
        } else {
            None
        }
    }

    /// Number of the next page, if any.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        if self.has_next() {
            self.request.page().checked_add(1)
        } else {
            None
        }
    }

    /// Transform every row while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
            total: self.total,
        }
    }
}
