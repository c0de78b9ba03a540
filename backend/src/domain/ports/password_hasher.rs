//! Port for password hashing.
//!
//! Hashes are opaque strings (PHC format for the Argon2 adapter); the domain
//! only stores them and asks the hasher to verify. Both operations are
//! CPU-heavy, so adapters must not run them on the calling async task.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        Malformed { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// `Ok(false)` for a wrong password; errors only for unusable hashes.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
