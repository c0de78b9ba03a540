//! Port for job application persistence.
//!
//! The `(job, applicant)` pair is unique. Adapters enforce it with a storage
//! constraint and report the losing writer as
//! [`ApplicationRepositoryError::Conflict`], which is what makes concurrent
//! duplicate submissions deterministic.

use async_trait::async_trait;

use crate::domain::{Application, ApplicationId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "application repository query failed: {message}",
        /// The applicant already applied to this job.
        Conflict { message: String } => "application repository conflict: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError>;

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Applications submitted by `applicant`, newest first.
    async fn list_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError>;

    /// Persist the mutable fields of `application`. Returns `false` when it
    /// no longer exists.
    async fn update(&self, application: &Application) -> Result<bool, ApplicationRepositoryError>;

    /// Returns `false` when the application did not exist.
    async fn delete(&self, id: &ApplicationId) -> Result<bool, ApplicationRepositoryError>;
}
