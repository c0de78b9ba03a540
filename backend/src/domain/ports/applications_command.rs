//! Driving port for submitting and managing applications.

use async_trait::async_trait;

use crate::domain::{
    ApplicationDetails, ApplicationId, ApplicationStatus, Error, JobId, Principal,
};

/// Payload for a new application. The applicant is always the principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateApplicationRequest {
    pub job_id: JobId,
    pub cover_letter: String,
}

/// Fields an applicant may change after submitting. `None` leaves a field
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationPatch {
    pub cover_letter: Option<String>,
    pub status: Option<ApplicationStatus>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationsCommand: Send + Sync {
    /// Submit an application and notify the job's owner.
    ///
    /// A duplicate `(job, applicant)` pair is a conflict. If the owner cannot
    /// be notified the application is withdrawn and a `service_unavailable`
    /// error is returned.
    async fn create_application(
        &self,
        principal: Option<Principal>,
        request: CreateApplicationRequest,
    ) -> Result<ApplicationDetails, Error>;

    /// Apply `patch` to the caller's own application. Only the applicant may
    /// change it; for anyone else it does not exist.
    async fn update_application(
        &self,
        principal: Option<Principal>,
        id: ApplicationId,
        patch: ApplicationPatch,
    ) -> Result<ApplicationDetails, Error>;

    async fn delete_application(
        &self,
        principal: Option<Principal>,
        id: ApplicationId,
    ) -> Result<(), Error>;
}
