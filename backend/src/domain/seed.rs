//! First-run bootstrap of the sample account.

use tracing::info;

use crate::domain::password::PasswordHash;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, Error, User, UserId};

/// Email of the account created on first start.
pub const SAMPLE_USER_EMAIL: &str = "blogger@sample.com";
/// Password of the account created on first start.
pub const SAMPLE_USER_PASSWORD: &str = "password";

/// Whether [`ensure_user`] had to create the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The account was inserted.
    Created,
    /// An account with the email already existed.
    AlreadyPresent,
}

/// Create a user with `email` and `password` unless one already exists.
///
/// A concurrent instance winning the insert race counts as already present.
pub async fn ensure_user<R>(users: &R, email: &str, password: &str) -> Result<SeedOutcome, Error>
where
    R: UserRepository + ?Sized,
{
    let email = Email::new(email)
        .map_err(|err| Error::invalid_request(format!("invalid seed email: {err}")))?;
    if users
        .find_by_email(&email)
        .await
        .map_err(seed_error)?
        .is_some()
    {
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let password = zeroize::Zeroizing::new(password.to_owned());
    let hash = tokio::task::spawn_blocking(move || PasswordHash::hash(&password))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))?;

    let user = User::new(UserId::random(), email, hash);
    match users.insert(&user).await {
        Ok(()) => {
            info!(email = %user.email(), "seeded sample user");
            Ok(SeedOutcome::Created)
        }
        Err(UserPersistenceError::DuplicateEmail { .. }) => Ok(SeedOutcome::AlreadyPresent),
        Err(err) => Err(seed_error(err)),
    }
}

fn seed_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("failed to seed user: {other}")),
    }
}
