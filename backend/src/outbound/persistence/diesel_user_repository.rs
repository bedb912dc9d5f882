//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, PasswordHash, User, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed credential store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> UserPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation(constraint) => {
            UserPersistenceError::query(format!("{operation}: violates {constraint}"))
        }
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

/// Rows failing domain validation indicate corrupt data, reported as query
/// errors rather than silently skipped.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email = Email::new(&row.email).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored email failed validation");
        UserPersistenceError::query(format!("stored email is invalid: {err}"))
    })?;
    let password_hash = PasswordHash::parse(row.password_hash).map_err(|err| {
        warn!(user_id = %row.id, "stored password hash failed to parse");
        UserPersistenceError::query(err.to_string())
    })?;
    Ok(User::new(UserId::from_uuid(row.id), email, password_hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            password_hash: user.password_hash().as_str(),
        };

        let result = diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(error) => match classify_diesel_error(error, "insert user") {
                DieselFailure::UniqueViolation(_) => Err(UserPersistenceError::duplicate_email(
                    user.email().as_ref(),
                )),
                DieselFailure::Connection(message) => {
                    Err(UserPersistenceError::connection(message))
                }
                DieselFailure::Query(message) => Err(UserPersistenceError::query(message)),
            },
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by id"))?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by email"))?;
        row.map(row_to_user).transpose()
    }
}
