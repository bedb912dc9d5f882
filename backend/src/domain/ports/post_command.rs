//! Driving port for publishing posts.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostDraft};

/// Domain use-case port behind the creation form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Publish `draft`, stamping the current time when it has no date.
    async fn create_post(&self, draft: PostDraft) -> Result<Post, Error>;
}
