//! Port for profile persistence.
//!
//! At most one profile exists per user; a second insert for the same user
//! fails with [`ProfileRepositoryError::Conflict`].

use async_trait::async_trait;

use crate::domain::{Profile, ProfileId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
        /// The user already has a profile.
        Conflict { message: String } => "profile repository conflict: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileRepositoryError>;

    async fn find_by_user(&self, user: &UserId) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Persist the mutable fields of `profile`. Returns `false` when it no
    /// longer exists.
    async fn update(&self, profile: &Profile) -> Result<bool, ProfileRepositoryError>;
}
