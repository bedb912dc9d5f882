//! Driving port for the login form.
//!
//! Inbound adapters call this port to turn submitted credentials into a
//! session [`Principal`] without knowing how users are stored.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and return the matching principal.
    ///
    /// Every mismatch yields [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized)
    /// with the same message, whether or not the email exists.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}
