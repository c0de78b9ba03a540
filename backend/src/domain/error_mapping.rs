//! Translation of driven-port errors into domain errors.
//!
//! Connection failures become `service_unavailable`; query failures become
//! `internal_error`. Conflicts are mapped by the calling service because the
//! message depends on the use case.

use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{
    ApplicationRepositoryError, JobRepositoryError, NotifierError, PasswordHashError,
    ProfileRepositoryError, SearchIndexError, UserPersistenceError,
};

fn unavailable(store: &str, message: &str) -> Error {
    error!(store, %message, "store unavailable");
    Error::service_unavailable(format!("{store} unavailable"))
}

fn failed(store: &str, message: &str) -> Error {
    error!(store, %message, "store query failed");
    Error::internal(format!("{store} error: {message}"))
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => unavailable("user repository", &message),
        UserPersistenceError::Query { message } => failed("user repository", &message),
        UserPersistenceError::Conflict { message } => Error::conflict(message),
    }
}

pub(crate) fn map_job_error(error: JobRepositoryError) -> Error {
    match error {
        JobRepositoryError::Connection { message } => unavailable("job repository", &message),
        JobRepositoryError::Query { message } => failed("job repository", &message),
    }
}

pub(crate) fn map_application_error(error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::Connection { message } => {
            unavailable("application repository", &message)
        }
        ApplicationRepositoryError::Query { message } => {
            failed("application repository", &message)
        }
        ApplicationRepositoryError::Conflict { .. } => {
            Error::conflict("You have already applied to this job.")
        }
    }
}

pub(crate) fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            unavailable("profile repository", &message)
        }
        ProfileRepositoryError::Query { message } => failed("profile repository", &message),
        ProfileRepositoryError::Conflict { .. } => {
            Error::conflict("A profile already exists for this user.")
        }
    }
}

pub(crate) fn map_search_error(error: SearchIndexError) -> Error {
    match error {
        SearchIndexError::Unavailable { message } | SearchIndexError::Query { message } => {
            unavailable("search index", &message)
        }
    }
}

pub(crate) fn map_notifier_error(error: NotifierError) -> Error {
    error!(error = %error, "notification delivery failed");
    Error::service_unavailable("notification could not be delivered")
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}
