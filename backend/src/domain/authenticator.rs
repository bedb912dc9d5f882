//! Password authentication and session principal resolution.
//!
//! [`PasswordAuthenticator`] implements both driving ports that touch the
//! credential store: [`LoginService`] for the login form and
//! [`PrincipalQuery`] for re-resolving the user id kept in the session.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::password::{PasswordHash, verify_against_dummy};
use crate::domain::ports::{LoginService, PrincipalQuery, UserPersistenceError, UserRepository};
use crate::domain::{
    Email, Error, INVALID_CREDENTIALS_MESSAGE, LoginCredentials, Principal, UserId,
};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::internal(format!("unexpected duplicate user {email}"))
        }
    }
}

/// Runs argon2 off the async workers. Without a stored hash a dummy
/// verification still runs and the result is always `false`.
async fn verify_password(hash: Option<PasswordHash>, password: &str) -> Result<bool, Error> {
    let password = zeroize::Zeroizing::new(password.to_owned());
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => hash.verify(&password),
        None => {
            verify_against_dummy(&password);
            false
        }
    })
    .await
    .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
}

/// Authenticator backed by a [`UserRepository`].
#[derive(Clone)]
pub struct PasswordAuthenticator<R> {
    users: Arc<R>,
}

impl<R> PasswordAuthenticator<R> {
    /// Create an authenticator over the credential store.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> LoginService for PasswordAuthenticator<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        // A malformed email cannot match any stored user.
        let user = match Email::new(credentials.email()) {
            Ok(email) => self
                .users
                .find_by_email(&email)
                .await
                .map_err(map_repository_error)?,
            Err(_) => None,
        };

        let stored_hash = user.as_ref().map(|user| user.password_hash().clone());
        let matched = verify_password(stored_hash, credentials.password()).await?;

        match user {
            Some(user) if matched => {
                debug!(user_id = %user.id(), "login accepted");
                Ok(Principal::from(&user))
            }
            _ => {
                info!("login rejected");
                Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))
            }
        }
    }
}

#[async_trait]
impl<R> PrincipalQuery for PasswordAuthenticator<R>
where
    R: UserRepository,
{
    async fn find_principal(&self, id: &UserId) -> Result<Option<Principal>, Error> {
        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?;
        Ok(user.as_ref().map(Principal::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::User;
    use crate::domain::ports::MockUserRepository;
    use rstest::{fixture, rstest};

    const EMAIL: &str = "blogger@sample.com";

    #[fixture]
    fn stored_user() -> User {
        User::new(
            UserId::random(),
            Email::new(EMAIL).expect("valid email"),
            PasswordHash::hash("password").expect("hash password"),
        )
    }

    fn repo_returning(user: Option<User>) -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(user));
        repo
    }

    fn credentials(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, password).expect("credentials shape")
    }

    #[rstest]
    #[tokio::test]
    async fn matching_password_yields_principal(stored_user: User) {
        let expected_id = *stored_user.id();
        let service = PasswordAuthenticator::new(Arc::new(repo_returning(Some(stored_user))));

        let principal = service
            .authenticate(&credentials(EMAIL, "password"))
            .await
            .expect("login succeeds");

        assert_eq!(principal.id(), &expected_id);
        assert_eq!(principal.email().as_ref(), EMAIL);
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_identically(stored_user: User) {
        let wrong_password = PasswordAuthenticator::new(Arc::new(repo_returning(Some(stored_user))))
            .authenticate(&credentials(EMAIL, "wrong"))
            .await
            .expect_err("wrong password fails");
        let unknown_email = PasswordAuthenticator::new(Arc::new(repo_returning(None)))
            .authenticate(&credentials("nobody@x.com", "password"))
            .await
            .expect_err("unknown email fails");

        assert_eq!(wrong_password.code(), ErrorCode::Unauthorized);
        assert_eq!(unknown_email.code(), ErrorCode::Unauthorized);
        assert_eq!(wrong_password.message(), INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(wrong_password.message(), unknown_email.message());
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_email_skips_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        let service = PasswordAuthenticator::new(Arc::new(repo));

        let err = service
            .authenticate(&credentials("not-an-email", "password"))
            .await
            .expect_err("malformed email fails");

        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn storage_failures_are_mapped(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(move |_| Err(failure));
        let service = PasswordAuthenticator::new(Arc::new(repo));

        let err = service
            .authenticate(&credentials(EMAIL, "password"))
            .await
            .expect_err("storage failure surfaces");

        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn find_principal_resolves_existing_user(stored_user: User) {
        let id = *stored_user.id();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .return_once(move |_| Ok(Some(stored_user)));
        let service = PasswordAuthenticator::new(Arc::new(repo));

        let principal = service.find_principal(&id).await.expect("query succeeds");

        assert_eq!(principal.map(|p| *p.id()), Some(id));
    }

    #[rstest]
    #[tokio::test]
    async fn find_principal_returns_none_for_dangling_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
        let service = PasswordAuthenticator::new(Arc::new(repo));

        let principal = service
            .find_principal(&UserId::random())
            .await
            .expect("query succeeds");

        assert!(principal.is_none());
    }
}
