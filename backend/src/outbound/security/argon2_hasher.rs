//! Argon2id password hashing producing PHC strings.
//!
//! Each hash or verification runs on Tokio's blocking pool so an actix worker
//! keeps serving other requests meanwhile.

use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;
use password_hash::{PasswordHash, SaltString};
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

const SALT_LEN: usize = 16;

/// [`PasswordHasher`] backed by Argon2id with the crate's default parameters.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_now(&self, password: &str) -> Result<String, PasswordHashError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        getrandom::getrandom(&mut salt_bytes)
            .map_err(|error| PasswordHashError::hash(error.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|error| PasswordHashError::hash(error.to_string()))?;
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| PasswordHashError::hash(error.to_string()))
    }

    fn verify_now(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let parsed =
            PasswordHash::new(hash).map_err(|error| PasswordHashError::malformed(error.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(error) => Err(PasswordHashError::malformed(error.to_string())),
        }
    }
}

fn join_failed(error: task::JoinError) -> PasswordHashError {
    PasswordHashError::hash(format!("hashing task failed: {error}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let hasher = self.clone();
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || hasher.hash_now(&password))
            .await
            .map_err(join_failed)?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let hasher = self.clone();
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        task::spawn_blocking(move || hasher.verify_now(&password, &hash))
            .await
            .map_err(join_failed)?
    }
}
