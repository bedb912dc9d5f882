//! Server-rendered blog: session login, post creation and archive listings.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the entities,
//! services and ports; [`inbound`] adapts HTTP requests onto the driving
//! ports; [`outbound`] implements the driven ports on PostgreSQL.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
