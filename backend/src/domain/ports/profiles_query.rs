//! Driving port for profile reads.

use async_trait::async_trait;

use crate::domain::{Error, Principal, Profile, ProfileDocument, ProfileId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfilesQuery: Send + Sync {
    /// The principal's own profile, as a list of zero or one entries.
    async fn list_profiles(&self, principal: Option<Principal>) -> Result<Vec<Profile>, Error>;

    /// Another user's profile is reported as not found.
    async fn get_profile(
        &self,
        principal: Option<Principal>,
        id: ProfileId,
    ) -> Result<Profile, Error>;

    /// Full-text search over bio, username and email.
    async fn search_profiles(
        &self,
        principal: Option<Principal>,
        query: Option<String>,
    ) -> Result<Vec<ProfileDocument>, Error>;
}
