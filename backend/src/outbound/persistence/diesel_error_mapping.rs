//! Diesel and pool error translation shared by the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Classification of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation(String),
    /// Any other query failure.
    Query(String),
}

/// Classify `error`, logging the database detail at debug level only so
/// callers can surface generic messages.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &str) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(%error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection(format!("{operation}: database connection error"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation(info.constraint_name().unwrap_or("unique").to_owned())
        }
        DieselError::NotFound => DieselFailure::Query(format!("{operation}: record not found")),
        DieselError::QueryBuilderError(_) => {
            DieselFailure::Query(format!("{operation}: database query error"))
        }
        _ => DieselFailure::Query(format!("{operation}: database error")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    #[derive(Debug)]
    struct Info;

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some("users_email_key")
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info))
    }

    #[rstest]
    fn closed_connection_is_a_connection_failure() {
        let failure = classify_diesel_error(
            database_error(DatabaseErrorKind::ClosedConnection),
            "find user",
        );
        assert_eq!(
            failure,
            DieselFailure::Connection("find user: database connection error".to_owned())
        );
    }

    #[rstest]
    fn unique_violation_reports_constraint() {
        let failure =
            classify_diesel_error(database_error(DatabaseErrorKind::UniqueViolation), "insert");
        assert_eq!(failure, DieselFailure::UniqueViolation("users_email_key".to_owned()));
    }

    #[rstest]
    #[case(DieselError::NotFound, "list posts: record not found")]
    #[case(database_error(DatabaseErrorKind::CheckViolation), "list posts: database error")]
    fn other_errors_are_query_failures(#[case] error: DieselError, #[case] expected: &str) {
        assert_eq!(
            classify_diesel_error(error, "list posts"),
            DieselFailure::Query(expected.to_owned())
        );
    }
}
