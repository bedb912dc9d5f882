//! Driving port resolving a session's stored user id back to a principal.

use async_trait::async_trait;

use crate::domain::{Error, Principal, UserId};

/// Re-fetches the user behind a session on every request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrincipalQuery: Send + Sync {
    /// Return the principal for `id`, or `None` when the user no longer exists.
    async fn find_principal(&self, id: &UserId) -> Result<Option<Principal>, Error>;
}
