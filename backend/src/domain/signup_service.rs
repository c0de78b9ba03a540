//! Account provisioning.
//!
//! `validate -> create account and profile (one transaction) -> index
//! profile (best-effort) -> welcome notification (best-effort)`. Nothing
//! after the transaction can undo it.
//!
//! Public signup never yields an administrator. The only way to get one is
//! [`SignupCommand::bootstrap_admin`], driven by deployment settings at
//! startup.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::error_mapping::{map_hash_error, map_user_error};
use crate::domain::ports::{
    NewAccount, Notifier, PasswordHasher, SearchIndex, SignupCommand, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, FieldErrors, Notification, Profile, ProfileDocument, SignupForm, SignupRequest,
    USERNAME_TAKEN, User,
};

/// Signup service implementing [`SignupCommand`].
pub struct SignupService<U: ?Sized, H: ?Sized, N: ?Sized, S: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    notifier: Arc<N>,
    search: Arc<S>,
}

impl<U: ?Sized, H: ?Sized, N: ?Sized, S: ?Sized> SignupService<U, H, N, S> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, notifier: Arc<N>, search: Arc<S>) -> Self {
        Self {
            users,
            hasher,
            notifier,
            search,
        }
    }
}

impl<U, H, N, S> SignupService<U, H, N, S>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    N: Notifier + ?Sized,
    S: SearchIndex + ?Sized,
{
    async fn username_taken(&self, username: &str) -> Result<bool, Error> {
        self.users
            .username_exists(username.trim())
            .await
            .map_err(map_user_error)
    }

    async fn provision(&self, request: SignupRequest) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(request.password())
            .await
            .map_err(map_hash_error)?;
        let user = User::register(
            request.username().clone(),
            request.email().clone(),
            request.role(),
        );
        let profile = Profile::empty(user.id);
        let account = NewAccount {
            user,
            password_hash,
            profile,
        };

        match self.users.create_account(&account).await {
            Ok(()) => {}
            Err(UserPersistenceError::Conflict { .. }) => {
                let mut errors = FieldErrors::default();
                errors.push("username", USERNAME_TAKEN);
                return Err(errors.into_error("signup payload is invalid"));
            }
            Err(other) => return Err(map_user_error(other)),
        }

        let NewAccount { user, profile, .. } = account;
        info!(user_id = %user.id, role = %user.role, "account provisioned");

        self.index_profile(&profile, &user).await;
        self.send_welcome(&user).await;
        Ok(user)
    }

    async fn index_profile(&self, profile: &Profile, user: &User) {
        let document = ProfileDocument::new(profile, user);
        if let Err(error) = self.search.index_profile(&document).await {
            warn!(user_id = %user.id, %error, "profile indexing failed; search will lag");
        }
    }

    async fn send_welcome(&self, user: &User) {
        let notification = Notification::welcome(user.email.clone(), &user.username);
        if let Err(error) = self.notifier.send(&notification).await {
            warn!(user_id = %user.id, %error, "welcome notification failed");
        }
    }
}

#[async_trait]
impl<U, H, N, S> SignupCommand for SignupService<U, H, N, S>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    N: Notifier + ?Sized,
    S: SearchIndex + ?Sized,
{
    async fn signup(&self, form: SignupForm) -> Result<User, Error> {
        let username_taken = self.username_taken(&form.username).await?;
        let request = form.validate(username_taken)?;
        self.provision(request).await
    }

    async fn bootstrap_admin(&self, form: SignupForm) -> Result<Option<User>, Error> {
        if self.username_taken(&form.username).await? {
            info!(username = %form.username.trim(), "bootstrap admin already exists");
            return Ok(None);
        }
        let request = form.validate_admin(false)?;
        self.provision(request).await.map(Some)
    }
}

#[cfg(test)]
#[path = "signup_service_tests.rs"]
mod tests;
