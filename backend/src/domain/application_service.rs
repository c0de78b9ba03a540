//! Job application use cases.
//!
//! Applications are private to their applicant: reads and mutations by
//! anyone else, admins included, are reported as not found. Submitting an
//! application notifies the job's owner; if that notification cannot be
//! delivered the application is withdrawn and the request fails.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::error_mapping::{
    map_application_error, map_job_error, map_notifier_error, map_user_error,
};
use crate::domain::ports::{
    ApplicationPatch, ApplicationRepository, ApplicationsCommand, ApplicationsQuery,
    CreateApplicationRequest, JobRepository, Notifier, UserRepository,
};
use crate::domain::{
    AccessPolicy, Action, Application, ApplicationDetails, ApplicationId, Error, FieldErrors, Job,
    JobId, Notification, Principal, Resource, User, UserId, authorize, authorize_principal,
    not_found,
};

/// Message attached to `job_id` when the referenced job does not exist.
pub const JOB_DOES_NOT_EXIST: &str = "Job does not exist.";

/// Application service implementing [`ApplicationsQuery`] and
/// [`ApplicationsCommand`].
pub struct ApplicationService<A: ?Sized, J: ?Sized, U: ?Sized, N: ?Sized> {
    applications: Arc<A>,
    jobs: Arc<J>,
    users: Arc<U>,
    notifier: Arc<N>,
    policy: AccessPolicy,
}

impl<A: ?Sized, J: ?Sized, U: ?Sized, N: ?Sized> ApplicationService<A, J, U, N> {
    pub fn new(
        applications: Arc<A>,
        jobs: Arc<J>,
        users: Arc<U>,
        notifier: Arc<N>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            applications,
            jobs,
            users,
            notifier,
            policy,
        }
    }
}

impl<A, J, U, N> ApplicationService<A, J, U, N>
where
    A: ApplicationRepository + ?Sized,
    J: JobRepository + ?Sized,
    U: UserRepository + ?Sized,
    N: Notifier + ?Sized,
{
    async fn load(&self, id: &ApplicationId) -> Result<Option<Application>, Error> {
        self.applications
            .find_by_id(id)
            .await
            .map_err(map_application_error)
    }

    async fn load_job(&self, id: &JobId) -> Result<Option<Job>, Error> {
        self.jobs.find_by_id(id).await.map_err(map_job_error)
    }

    /// Attach the targeted job. A dangling reference means the job was
    /// removed underneath the application.
    async fn with_job(&self, application: Application) -> Result<ApplicationDetails, Error> {
        let job = self
            .load_job(&application.job_id)
            .await?
            .ok_or_else(|| not_found("application"))?;
        Ok(ApplicationDetails { application, job })
    }

    async fn load_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                error!(user_id = %id, "notification recipient missing");
                Error::service_unavailable("notification could not be delivered")
            })
    }

    async fn notify_owner(&self, job: &Job, applicant: &UserId) -> Result<(), Error> {
        let owner = self.load_user(&job.posted_by).await?;
        let applicant = self.load_user(applicant).await?;
        let notification =
            Notification::application_received(owner.email, &applicant.username, &job.title);
        self.notifier
            .send(&notification)
            .await
            .map_err(map_notifier_error)
    }

    async fn withdraw(&self, application: &Application) {
        match self.applications.delete(&application.id).await {
            Ok(_) => {
                info!(application_id = %application.id, "application withdrawn");
            }
            Err(error) => {
                error!(
                    application_id = %application.id,
                    %error,
                    "failed to withdraw undelivered application"
                );
            }
        }
    }
}

#[async_trait]
impl<A, J, U, N> ApplicationsQuery for ApplicationService<A, J, U, N>
where
    A: ApplicationRepository + ?Sized,
    J: JobRepository + ?Sized,
    U: UserRepository + ?Sized,
    N: Notifier + ?Sized,
{
    async fn list_applications(
        &self,
        principal: Option<Principal>,
    ) -> Result<Vec<ApplicationDetails>, Error> {
        let principal = authorize_principal(
            self.policy,
            principal.as_ref(),
            Action::List,
            Resource::Application(None),
        )?;
        let applications = self
            .applications
            .list_by_applicant(principal.id())
            .await
            .map_err(map_application_error)?;

        let mut details = Vec::with_capacity(applications.len());
        for application in applications {
            match self.load_job(&application.job_id).await? {
                Some(job) => details.push(ApplicationDetails { application, job }),
                None => {
                    warn!(application_id = %application.id, "skipping application for removed job");
                }
            }
        }
        Ok(details)
    }

    async fn get_application(
        &self,
        principal: Option<Principal>,
        id: ApplicationId,
    ) -> Result<ApplicationDetails, Error> {
        let application = self.load(&id).await?;
        authorize(
            self.policy,
            principal.as_ref(),
            Action::Read,
            Resource::Application(application.as_ref()),
        )?;
        let application = application.ok_or_else(|| not_found("application"))?;
        self.with_job(application).await
    }
}

#[async_trait]
impl<A, J, U, N> ApplicationsCommand for ApplicationService<A, J, U, N>
where
    A: ApplicationRepository + ?Sized,
    J: JobRepository + ?Sized,
    U: UserRepository + ?Sized,
    N: Notifier + ?Sized,
{
    async fn create_application(
        &self,
        principal: Option<Principal>,
        request: CreateApplicationRequest,
    ) -> Result<ApplicationDetails, Error> {
        let principal = authorize_principal(
            self.policy,
            principal.as_ref(),
            Action::Create,
            Resource::Application(None),
        )?;
        let Some(job) = self.load_job(&request.job_id).await? else {
            let mut errors = FieldErrors::default();
            errors.push("job_id", JOB_DOES_NOT_EXIST);
            return Err(errors.into_error("application payload is invalid"));
        };

        let application = Application::submit(job.id, *principal.id(), request.cover_letter);
        self.applications
            .insert(&application)
            .await
            .map_err(map_application_error)?;

        if let Err(err) = self.notify_owner(&job, principal.id()).await {
            self.withdraw(&application).await;
            return Err(err);
        }
        info!(
            application_id = %application.id,
            job_id = %job.id,
            applicant = %application.applicant,
            "application submitted"
        );
        Ok(ApplicationDetails { application, job })
    }

    async fn update_application(
        &self,
        principal: Option<Principal>,
        id: ApplicationId,
        patch: ApplicationPatch,
    ) -> Result<ApplicationDetails, Error> {
        let application = self.load(&id).await?;
        authorize(
            self.policy,
            principal.as_ref(),
            Action::Update,
            Resource::Application(application.as_ref()),
        )?;
        let mut application = application.ok_or_else(|| not_found("application"))?;

        if let Some(cover_letter) = patch.cover_letter {
            application.cover_letter = cover_letter;
        }
        if let Some(status) = patch.status {
            application.status = status;
        }
        if !self
            .applications
            .update(&application)
            .await
            .map_err(map_application_error)?
        {
            return Err(not_found("application"));
        }
        self.with_job(application).await
    }

    async fn delete_application(
        &self,
        principal: Option<Principal>,
        id: ApplicationId,
    ) -> Result<(), Error> {
        let application = self.load(&id).await?;
        authorize(
            self.policy,
            principal.as_ref(),
            Action::Delete,
            Resource::Application(application.as_ref()),
        )?;

        if !self
            .applications
            .delete(&id)
            .await
            .map_err(map_application_error)?
        {
            return Err(not_found("application"));
        }
        info!(application_id = %id, "application deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "application_service_tests.rs"]
mod tests;
