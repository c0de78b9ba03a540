//! Password login and session principal resolution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::error_mapping::map_user_error;
use crate::domain::ports::{LoginService, PasswordHasher, UserRepository};
use crate::domain::{Error, LoginCredentials, Principal, User, UserId};

/// [`LoginService`] backed by stored Argon2 hashes.
pub struct PasswordLoginService<U: ?Sized, H: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U: ?Sized, H: ?Sized> PasswordLoginService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

#[async_trait]
impl<U, H> LoginService for PasswordLoginService<U, H>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(stored) = self
            .users
            .find_credentials(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login for unknown username");
            return Err(invalid_credentials());
        };

        match self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
        {
            Ok(true) => Ok(stored.user),
            Ok(false) => {
                debug!(user_id = %stored.user.id, "login with wrong password");
                Err(invalid_credentials())
            }
            Err(err) => {
                error!(user_id = %stored.user.id, error = %err, "stored password hash unusable");
                Err(invalid_credentials())
            }
        }
    }

    async fn principal_for(&self, user_id: &UserId) -> Result<Option<Principal>, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?;
        Ok(user.as_ref().map(Principal::from))
    }
}
