//! Driving port for public job reads.

use async_trait::async_trait;

use crate::domain::{Error, Job, JobDocument, JobId, Principal};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobsQuery: Send + Sync {
    /// All jobs, newest first.
    async fn list_jobs(&self, principal: Option<Principal>) -> Result<Vec<Job>, Error>;

    async fn get_job(&self, principal: Option<Principal>, id: JobId) -> Result<Job, Error>;

    /// Full-text search. A blank query yields no hits.
    async fn search_jobs(
        &self,
        principal: Option<Principal>,
        query: Option<String>,
    ) -> Result<Vec<JobDocument>, Error>;
}
