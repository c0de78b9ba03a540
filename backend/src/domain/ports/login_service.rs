//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials and to turn a
//! session's user id back into a [`Principal`] without importing the backing
//! infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal, User, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Resolve the principal for a session's user id.
    ///
    /// `Ok(None)` when the account no longer exists; callers treat that as
    /// an anonymous request.
    async fn principal_for(&self, user_id: &UserId) -> Result<Option<Principal>, Error>;
}
