//! Port for job posting persistence.

use async_trait::async_trait;

use crate::domain::{Job, JobId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by job repository adapters.
    pub enum JobRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "job repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "job repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError>;

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError>;

    /// All jobs, newest first.
    async fn list(&self) -> Result<Vec<Job>, JobRepositoryError>;

    /// Persist the mutable fields of `job`. Returns `false` when it no longer exists.
    async fn update(&self, job: &Job) -> Result<bool, JobRepositoryError>;

    /// Remove the job and, through the foreign key, its applications.
    /// Returns `false` when it did not exist.
    async fn delete(&self, id: &JobId) -> Result<bool, JobRepositoryError>;
}
