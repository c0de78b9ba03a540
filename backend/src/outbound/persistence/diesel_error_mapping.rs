//! Shared Diesel error classification for the repositories.
//!
//! Each repository has its own port error enum; this module sorts Diesel and
//! pool failures into the three categories those enums share and lets the
//! caller pick the constructor.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Category of a persistence failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Failure {
    Connection(String),
    Query(String),
    /// A unique constraint rejected the write. Carries the constraint name
    /// when the server reported one.
    Conflict(String),
}

impl From<PoolError> for Failure {
    fn from(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::Connection(message)
            }
        }
    }
}

impl From<DieselError> for Failure {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => Self::Conflict(
                info.constraint_name()
                    .unwrap_or("unique constraint")
                    .to_owned(),
            ),
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection error".to_owned())
            }
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => Self::Query("database query error".to_owned()),
            _ => Self::Query("database error".to_owned()),
        }
    }
}

/// Collect converted rows, turning the first invalid row into a query failure.
pub(crate) fn collect_rows<T>(
    results: impl Iterator<Item = Result<T, String>>,
) -> Result<Vec<T>, Failure> {
    results
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| Failure::Query(format!("invalid stored row: {message}")))
}

/// Implement `From<Failure>` for a port error with `Connection`, `Query` and,
/// optionally, `Conflict` constructors. Without a conflict constructor a
/// conflict is reported as a query failure.
macro_rules! impl_from_failure {
    ($error:ty, conflict) => {
        impl From<$crate::outbound::persistence::diesel_error_mapping::Failure> for $error {
            fn from(failure: $crate::outbound::persistence::diesel_error_mapping::Failure) -> Self {
                use $crate::outbound::persistence::diesel_error_mapping::Failure;
                match failure {
                    Failure::Connection(message) => Self::connection(message),
                    Failure::Query(message) => Self::query(message),
                    Failure::Conflict(message) => Self::conflict(message),
                }
            }
        }
    };
    ($error:ty) => {
        impl From<$crate::outbound::persistence::diesel_error_mapping::Failure> for $error {
            fn from(failure: $crate::outbound::persistence::diesel_error_mapping::Failure) -> Self {
                use $crate::outbound::persistence::diesel_error_mapping::Failure;
                match failure {
                    Failure::Connection(message) => Self::connection(message),
                    Failure::Query(message) | Failure::Conflict(message) => Self::query(message),
                }
            }
        }
    };
}

pub(crate) use impl_from_failure;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let failure = Failure::from(PoolError::checkout("connection refused"));
        assert_eq!(failure, Failure::Connection("connection refused".to_owned()));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        assert_eq!(
            Failure::from(DieselError::NotFound),
            Failure::Query("record not found".to_owned())
        );
    }

    #[rstest]
    fn first_invalid_row_fails_collection() {
        let rows = vec![Ok(1), Err("bad role".to_owned()), Ok(3)];
        let failure = collect_rows(rows.into_iter()).expect_err("invalid row");
        assert!(matches!(failure, Failure::Query(message) if message.contains("bad role")));
    }
}
