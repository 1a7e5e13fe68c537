//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashes are stored as PHC strings, so the algorithm parameters and salt
//! travel with each hash and verification needs nothing else.

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use rand::RngCore;

use crate::domain::Password;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

const SALT_LEN: usize = 16;

/// Argon2id hasher using the crate's default parameters.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create a hasher with default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn random_salt() -> Result<SaltString, PasswordHashError> {
        let mut bytes = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        SaltString::encode_b64(&bytes).map_err(|err| PasswordHashError::hash(err.to_string()))
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<String, PasswordHashError> {
        let salt = Self::random_salt()?;
        self.argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, candidate: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hash(err.to_string())),
        }
    }
}
