//! Domain primitives, services and ports.
//!
//! Purpose: define the blog's entities and use-cases independently of HTTP
//! and storage. Inbound adapters call the driving ports in [`ports`];
//! outbound adapters implement the driven repository ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Email, UserId, PasswordHash: credential store records.
//! - LoginCredentials, Principal: login input and session identity.
//! - Post, PostDraft, PostId: published content and its validated input.
//! - ArchiveMonth, PublishedWindow: month-based listing filters.
//! - PasswordAuthenticator, BlogPostService: port implementations.

pub mod archive;
pub mod auth;
pub mod authenticator;
pub mod category;
pub mod error;
pub mod password;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod seed;
pub mod trace_id;
pub mod user;

pub use self::archive::{ArchiveMonth, ArchiveMonthError, PublishedWindow};
pub use self::auth::{
    INVALID_CREDENTIALS_MESSAGE, LoginCredentials, LoginValidationError, Principal,
};
pub use self::authenticator::PasswordAuthenticator;
pub use self::category::{Category, CategoryName, CategoryValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password::{PasswordError, PasswordHash};
pub use self::post::{
    Post, PostDraft, PostField, PostId, PostValidationError, PostValidationErrors,
};
pub use self::post_service::BlogPostService;
pub use self::seed::{SAMPLE_USER_EMAIL, SAMPLE_USER_PASSWORD, SeedOutcome, ensure_user};
pub use self::trace_id::TraceId;
pub use self::user::{Email, User, UserId, UserValidationError};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient result alias for fallible domain operations.
///
/// # Examples
/// ```
/// use blog::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("no such post"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
