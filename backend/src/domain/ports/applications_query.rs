//! Driving port for reading a principal's own applications.

use async_trait::async_trait;

use crate::domain::{ApplicationDetails, ApplicationId, Error, Principal};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationsQuery: Send + Sync {
    /// Applications submitted by the principal, newest first.
    async fn list_applications(
        &self,
        principal: Option<Principal>,
    ) -> Result<Vec<ApplicationDetails>, Error>;

    /// Foreign and missing applications are both reported as not found.
    async fn get_application(
        &self,
        principal: Option<Principal>,
        id: ApplicationId,
    ) -> Result<ApplicationDetails, Error>;
}
