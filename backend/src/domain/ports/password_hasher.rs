//! Port for one-way password hashing.

use crate::domain::Password;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing the password failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Port for producing and checking password hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a new password into a self-describing string.
    fn hash(&self, password: &Password) -> Result<String, PasswordHashError>;

    /// Check a candidate password against a stored hash.
    fn verify(&self, candidate: &str, stored_hash: &str) -> Result<bool, PasswordHashError>;
}
