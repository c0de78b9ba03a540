//! Driving port for job mutations.
//!
//! Only recruiters and admins may mutate jobs; whether they must also own the
//! job is governed by the configured [`crate::domain::JobEditPolicy`].

use async_trait::async_trait;

use crate::domain::{Error, Job, JobDraft, JobId, JobPatch, Principal};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobsCommand: Send + Sync {
    /// Create a job owned by `principal`.
    async fn create_job(&self, principal: Option<Principal>, draft: JobDraft)
    -> Result<Job, Error>;

    async fn update_job(
        &self,
        principal: Option<Principal>,
        id: JobId,
        patch: JobPatch,
    ) -> Result<Job, Error>;

    async fn delete_job(&self, principal: Option<Principal>, id: JobId) -> Result<(), Error>;
}
