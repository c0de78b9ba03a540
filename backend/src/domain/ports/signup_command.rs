//! Driving port for account provisioning.

use async_trait::async_trait;

use crate::domain::{Error, SignupForm, User};

/// Register an account, its empty profile and send the welcome message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupCommand: Send + Sync {
    /// Returns the created user. Validation failures carry
    /// `details.fieldErrors`; a failed welcome message is not an error.
    async fn signup(&self, form: SignupForm) -> Result<User, Error>;

    /// Provision the administrator named by deployment settings. Returns
    /// `None` when the username is already registered, so it is safe to run
    /// on every start.
    async fn bootstrap_admin(&self, form: SignupForm) -> Result<Option<User>, Error>;
}
