//! Port for post persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Post, PublishedWindow};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Content store for published posts.
///
/// Listings are ordered by `pub_date` descending, ties broken by id
/// descending, so pages are stable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post.
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError>;

    /// Posts inside `window`, sliced to `page` when one is given.
    async fn list(
        &self,
        window: PublishedWindow,
        page: Option<PageRequest>,
    ) -> Result<Vec<Post>, PostPersistenceError>;

    /// Number of posts inside `window`.
    async fn count(&self, window: PublishedWindow) -> Result<u64, PostPersistenceError>;
}
