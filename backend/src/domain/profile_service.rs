//! Profile use cases.
//!
//! A profile is visible only to its owner. The "my profile" operations
//! create an empty profile on first use so accounts that predate profile
//! provisioning still converge on exactly one.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::error_mapping::{map_profile_error, map_search_error};
use crate::domain::ports::{
    ProfileRepository, ProfilesCommand, ProfilesQuery, SearchIndex, UserRepository,
};
use crate::domain::{
    AccessPolicy, Action, Error, Principal, Profile, ProfileDocument, ProfileFields, ProfileId,
    Resource, UserId, authorize, authorize_principal, normalise_query, not_found,
};

/// Profile service implementing [`ProfilesQuery`] and [`ProfilesCommand`].
pub struct ProfileService<P: ?Sized, U: ?Sized, S: ?Sized> {
    profiles: Arc<P>,
    users: Arc<U>,
    search: Arc<S>,
    policy: AccessPolicy,
}

impl<P: ?Sized, U: ?Sized, S: ?Sized> ProfileService<P, U, S> {
    pub fn new(profiles: Arc<P>, users: Arc<U>, search: Arc<S>, policy: AccessPolicy) -> Self {
        Self {
            profiles,
            users,
            search,
            policy,
        }
    }
}

impl<P, U, S> ProfileService<P, U, S>
where
    P: ProfileRepository + ?Sized,
    U: UserRepository + ?Sized,
    S: SearchIndex + ?Sized,
{
    async fn load(&self, id: &ProfileId) -> Result<Option<Profile>, Error> {
        self.profiles.find_by_id(id).await.map_err(map_profile_error)
    }

    async fn find_for_user(&self, user: &UserId) -> Result<Option<Profile>, Error> {
        self.profiles
            .find_by_user(user)
            .await
            .map_err(map_profile_error)
    }

    /// Return the user's profile, inserting an empty one when absent. A
    /// concurrent insert that wins the race is re-read rather than reported.
    async fn fetch_or_create(&self, user: &UserId) -> Result<Profile, Error> {
        if let Some(profile) = self.find_for_user(user).await? {
            return Ok(profile);
        }

        let profile = Profile::empty(*user);
        match self.profiles.insert(&profile).await {
            Ok(()) => {
                info!(user_id = %user, profile_id = %profile.id, "profile created on first access");
                self.reindex(&profile).await;
                Ok(profile)
            }
            Err(err) => match self.find_for_user(user).await? {
                Some(existing) => Ok(existing),
                None => Err(map_profile_error(err)),
            },
        }
    }

    async fn save(&self, profile: &Profile) -> Result<(), Error> {
        if !self
            .profiles
            .update(profile)
            .await
            .map_err(map_profile_error)?
        {
            return Err(not_found("profile"));
        }
        self.reindex(profile).await;
        Ok(())
    }

    async fn reindex(&self, profile: &Profile) {
        let user = match self.users.find_by_id(&profile.user).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(profile_id = %profile.id, "profile owner missing; skipping index");
                return;
            }
            Err(error) => {
                warn!(profile_id = %profile.id, %error, "profile owner lookup failed; skipping index");
                return;
            }
        };
        let document = ProfileDocument::new(profile, &user);
        if let Err(error) = self.search.index_profile(&document).await {
            warn!(profile_id = %profile.id, %error, "profile indexing failed; search will lag");
        }
    }
}

#[async_trait]
impl<P, U, S> ProfilesQuery for ProfileService<P, U, S>
where
    P: ProfileRepository + ?Sized,
    U: UserRepository + ?Sized,
    S: SearchIndex + ?Sized,
{
    async fn list_profiles(&self, principal: Option<Principal>) -> Result<Vec<Profile>, Error> {
        let principal = authorize_principal(
            self.policy,
            principal.as_ref(),
            Action::List,
            Resource::Profile(None),
        )?;
        Ok(self
            .find_for_user(principal.id())
            .await?
            .into_iter()
            .collect())
    }

    async fn get_profile(
        &self,
        principal: Option<Principal>,
        id: ProfileId,
    ) -> Result<Profile, Error> {
        let profile = self.load(&id).await?;
        authorize(
            self.policy,
            principal.as_ref(),
            Action::Read,
            Resource::Profile(profile.as_ref()),
        )?;
        profile.ok_or_else(|| not_found("profile"))
    }

    async fn search_profiles(
        &self,
        principal: Option<Principal>,
        query: Option<String>,
    ) -> Result<Vec<ProfileDocument>, Error> {
        authorize(
            self.policy,
            principal.as_ref(),
            Action::List,
            Resource::Profile(None),
        )?;
        let Some(query) = normalise_query(query.as_deref()) else {
            return Ok(Vec::new());
        };
        self.search
            .search_profiles(&query)
            .await
            .map_err(map_search_error)
    }
}

#[async_trait]
impl<P, U, S> ProfilesCommand for ProfileService<P, U, S>
where
    P: ProfileRepository + ?Sized,
    U: UserRepository + ?Sized,
    S: SearchIndex + ?Sized,
{
    async fn create_profile(
        &self,
        principal: Option<Principal>,
        fields: ProfileFields,
    ) -> Result<Profile, Error> {
        let principal = authorize_principal(
            self.policy,
            principal.as_ref(),
            Action::Create,
            Resource::Profile(None),
        )?;
        let profile = fields.into_profile(*principal.id())?;
        self.profiles
            .insert(&profile)
            .await
            .map_err(map_profile_error)?;
        info!(user_id = %profile.user, profile_id = %profile.id, "profile created");

        self.reindex(&profile).await;
        Ok(profile)
    }

    async fn update_profile(
        &self,
        principal: Option<Principal>,
        id: ProfileId,
        fields: ProfileFields,
    ) -> Result<Profile, Error> {
        let profile = self.load(&id).await?;
        authorize(
            self.policy,
            principal.as_ref(),
            Action::Update,
            Resource::Profile(profile.as_ref()),
        )?;
        let mut profile = profile.ok_or_else(|| not_found("profile"))?;

        fields.apply_to(&mut profile)?;
        self.save(&profile).await?;
        Ok(profile)
    }

    async fn my_profile(&self, principal: Option<Principal>) -> Result<Profile, Error> {
        let principal = authorize_principal(
            self.policy,
            principal.as_ref(),
            Action::List,
            Resource::Profile(None),
        )?;
        let profile = self.fetch_or_create(principal.id()).await?;
        authorize(
            self.policy,
            Some(principal),
            Action::Read,
            Resource::Profile(Some(&profile)),
        )?;
        Ok(profile)
    }

    async fn update_my_profile(
        &self,
        principal: Option<Principal>,
        fields: ProfileFields,
    ) -> Result<Profile, Error> {
        let principal = authorize_principal(
            self.policy,
            principal.as_ref(),
            Action::List,
            Resource::Profile(None),
        )?;
        let mut profile = self.fetch_or_create(principal.id()).await?;
        authorize(
            self.policy,
            Some(principal),
            Action::Update,
            Resource::Profile(Some(&profile)),
        )?;

        fields.apply_to(&mut profile)?;
        self.save(&profile).await?;
        Ok(profile)
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
