//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `PrincipalQuery`, `PostCommand`,
//! `PostQuery`) are what HTTP handlers call. Driven ports
//! (`UserRepository`, `PostRepository`) are implemented by persistence
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod post_command;
mod post_query;
mod post_repository;
mod principal_query;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use post_command::PostCommand;
#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_query::PostQuery;
#[cfg(test)]
pub use post_query::MockPostQuery;
pub use post_repository::{PostPersistenceError, PostRepository};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use principal_query::PrincipalQuery;
#[cfg(test)]
pub use principal_query::MockPrincipalQuery;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
