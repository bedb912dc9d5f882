//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations of the domain's driven ports, backed by
//! `diesel-async` connections from a `bb8` pool.
//!
//! - Adapters only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Database failures become the ports' `Connection`/`Query` errors; the
//!   driver detail is logged at debug level only.
//!
//! ```ignore
//! use blog::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/sample_app")).await?;
//! let posts = DieselPostRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
