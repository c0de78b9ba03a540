//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Profile, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "user repository conflict: {message}",
    }
}

/// Everything written when an account is provisioned.
///
/// Adapters must persist the user and the profile atomically: an account
/// never exists without its profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub user: User,
    pub password_hash: String,
    pub profile: Profile,
}

/// Stored user together with its password hash, used only for login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user and its profile in one transaction.
    ///
    /// Returns [`UserPersistenceError::Conflict`] when the username is taken.
    async fn create_account(&self, account: &NewAccount) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch login material for `username`.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Whether an account already uses `username`.
    async fn username_exists(&self, username: &str) -> Result<bool, UserPersistenceError>;

    /// All users ordered by username.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}
