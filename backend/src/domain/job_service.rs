//! Job posting use cases.
//!
//! Reads are public. Mutations require a recruiter or admin and, under
//! [`JobEditPolicy::OwnerOrAdmin`](crate::domain::JobEditPolicy), ownership
//! of the job for non-admins. Search index updates are best-effort.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::error_mapping::{map_job_error, map_search_error};
use crate::domain::ports::{JobRepository, JobsCommand, JobsQuery, SearchIndex};
use crate::domain::{
    AccessPolicy, Action, Error, Job, JobDocument, JobDraft, JobId, JobPatch, Principal, Resource,
    authorize, authorize_principal, normalise_query, not_found,
};

/// Job service implementing [`JobsQuery`] and [`JobsCommand`].
pub struct JobService<J: ?Sized, S: ?Sized> {
    jobs: Arc<J>,
    search: Arc<S>,
    policy: AccessPolicy,
}

impl<J: ?Sized, S: ?Sized> JobService<J, S> {
    pub fn new(jobs: Arc<J>, search: Arc<S>, policy: AccessPolicy) -> Self {
        Self {
            jobs,
            search,
            policy,
        }
    }
}

impl<J, S> JobService<J, S>
where
    J: JobRepository + ?Sized,
    S: SearchIndex + ?Sized,
{
    async fn load(&self, id: &JobId) -> Result<Option<Job>, Error> {
        self.jobs.find_by_id(id).await.map_err(map_job_error)
    }

    async fn reindex(&self, job: &Job) {
        if let Err(error) = self.search.index_job(&JobDocument::from(job)).await {
            warn!(job_id = %job.id, %error, "job indexing failed; search will lag");
        }
    }
}

#[async_trait]
impl<J, S> JobsQuery for JobService<J, S>
where
    J: JobRepository + ?Sized,
    S: SearchIndex + ?Sized,
{
    async fn list_jobs(&self, principal: Option<Principal>) -> Result<Vec<Job>, Error> {
        authorize(
            self.policy,
            principal.as_ref(),
            Action::List,
            Resource::Job(None),
        )?;
        self.jobs.list().await.map_err(map_job_error)
    }

    async fn get_job(&self, principal: Option<Principal>, id: JobId) -> Result<Job, Error> {
        let job = self.load(&id).await?;
        authorize(
            self.policy,
            principal.as_ref(),
            Action::Read,
            Resource::Job(job.as_ref()),
        )?;
        job.ok_or_else(|| not_found("job"))
    }

    async fn search_jobs(
        &self,
        principal: Option<Principal>,
        query: Option<String>,
    ) -> Result<Vec<JobDocument>, Error> {
        authorize(
            self.policy,
            principal.as_ref(),
            Action::List,
            Resource::Job(None),
        )?;
        let Some(query) = normalise_query(query.as_deref()) else {
            return Ok(Vec::new());
        };
        self.search
            .search_jobs(&query)
            .await
            .map_err(map_search_error)
    }
}

#[async_trait]
impl<J, S> JobsCommand for JobService<J, S>
where
    J: JobRepository + ?Sized,
    S: SearchIndex + ?Sized,
{
    async fn create_job(&self, principal: Option<Principal>, draft: JobDraft) -> Result<Job, Error> {
        let principal = authorize_principal(
            self.policy,
            principal.as_ref(),
            Action::Create,
            Resource::Job(None),
        )?;
        let job = draft.into_job(*principal.id());
        self.jobs.insert(&job).await.map_err(map_job_error)?;
        info!(job_id = %job.id, posted_by = %job.posted_by, "job created");

        self.reindex(&job).await;
        Ok(job)
    }

    async fn update_job(
        &self,
        principal: Option<Principal>,
        id: JobId,
        patch: JobPatch,
    ) -> Result<Job, Error> {
        let job = self.load(&id).await?;
        authorize(
            self.policy,
            principal.as_ref(),
            Action::Update,
            Resource::Job(job.as_ref()),
        )?;
        let mut job = job.ok_or_else(|| not_found("job"))?;

        patch.apply_to(&mut job)?;
        if !self.jobs.update(&job).await.map_err(map_job_error)? {
            return Err(not_found("job"));
        }
        info!(job_id = %job.id, "job updated");

        self.reindex(&job).await;
        Ok(job)
    }

    async fn delete_job(&self, principal: Option<Principal>, id: JobId) -> Result<(), Error> {
        let job = self.load(&id).await?;
        authorize(
            self.policy,
            principal.as_ref(),
            Action::Delete,
            Resource::Job(job.as_ref()),
        )?;

        if !self.jobs.delete(&id).await.map_err(map_job_error)? {
            return Err(not_found("job"));
        }
        info!(job_id = %id, "job deleted");

        if let Err(error) = self.search.remove_job(&id).await {
            warn!(job_id = %id, %error, "job removal from index failed");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "job_service_tests.rs"]
mod tests;
