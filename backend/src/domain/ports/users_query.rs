//! Driving port for the read-only user directory.

use async_trait::async_trait;

use crate::domain::{Error, Principal, User, UserId};

/// Directory of registered users, visible to any authenticated principal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    async fn list_users(&self, principal: Option<Principal>) -> Result<Vec<User>, Error>;

    async fn get_user(&self, principal: Option<Principal>, id: UserId) -> Result<User, Error>;
}
