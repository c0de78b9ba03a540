//! Driving port for profile mutations.

use async_trait::async_trait;

use crate::domain::{Error, Principal, Profile, ProfileFields, ProfileId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfilesCommand: Send + Sync {
    /// Create the principal's profile; a second profile is a conflict.
    async fn create_profile(
        &self,
        principal: Option<Principal>,
        fields: ProfileFields,
    ) -> Result<Profile, Error>;

    async fn update_profile(
        &self,
        principal: Option<Principal>,
        id: ProfileId,
        fields: ProfileFields,
    ) -> Result<Profile, Error>;

    /// Return the principal's profile, creating an empty one on first use.
    ///
    /// Idempotent: concurrent first calls converge on the same profile.
    async fn my_profile(&self, principal: Option<Principal>) -> Result<Profile, Error>;

    /// Update the principal's profile, creating it first if needed.
    async fn update_my_profile(
        &self,
        principal: Option<Principal>,
        fields: ProfileFields,
    ) -> Result<Profile, Error>;
}
