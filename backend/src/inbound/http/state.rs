//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever talk to domain
//! ports, so tests can swap every dependency for a mock.

use std::sync::Arc;

use crate::domain::ports::{LoginService, PostCommand, PostQuery, PrincipalQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub principals: Arc<dyn PrincipalQuery>,
    pub posts: Arc<dyn PostQuery>,
    pub post_commands: Arc<dyn PostCommand>,
}

impl HttpState {
    pub fn new(
        login: Arc<dyn LoginService>,
        principals: Arc<dyn PrincipalQuery>,
        posts: Arc<dyn PostQuery>,
        post_commands: Arc<dyn PostCommand>,
    ) -> Self {
        Self {
            login,
            principals,
            posts,
            post_commands,
        }
    }
}
