//! Driving port for post listings.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{ArchiveMonth, Error, Post};

/// Read side of the blog, newest posts first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostQuery: Send + Sync {
    /// Every post.
    async fn list_all(&self) -> Result<Vec<Post>, Error>;

    /// One page of every post.
    async fn list_page(&self, request: PageRequest) -> Result<Page<Post>, Error>;

    /// Every post published during `month`.
    async fn list_archive(&self, month: ArchiveMonth) -> Result<Vec<Post>, Error>;

    /// One page of the posts published during `month`.
    async fn list_archive_page(
        &self,
        month: ArchiveMonth,
        request: PageRequest,
    ) -> Result<Page<Post>, Error>;
}
