//! Authentication primitives: login credentials and session principals.
//!
//! Handlers build [`LoginCredentials`] from form input before talking to the
//! [`LoginService`](super::ports::LoginService) port, so raw strings never
//! reach the domain.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Email, User, UserId};

/// Message shown for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email and/or password specified.";

/// Domain error returned when login form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use blog::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" blogger@sample.com ", "password")
///     .expect("valid credentials");
/// assert_eq!(creds.email(), "blogger@sample.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed email used for the user lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity attached to an authenticated browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: UserId,
    email: Email,
}

impl Principal {
    /// Build a principal from its parts.
    pub fn new(id: UserId, email: Email) -> Self {
        Self { id, email }
    }

    /// Identifier stored in the session cookie.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Email of the signed-in user.
    pub fn email(&self) -> &Email {
        &self.email
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(*user.id(), user.email().clone())
    }
}
