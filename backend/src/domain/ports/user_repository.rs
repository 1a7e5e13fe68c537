//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Bio, DisplayName, ProfileUpdate, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username {username} is already taken",
    }
}

/// Insert payload for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Identifier chosen by the service.
    pub id: UserId,
    /// Unique handle.
    pub username: Username,
    /// Display name.
    pub name: DisplayName,
    /// Optional profile blurb.
    pub bio: Option<Bio>,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

/// Stored login material for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Account identifier.
    pub user_id: UserId,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

/// Port for user account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return its public profile.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when the handle
    /// is taken, including when a concurrent registration wins the race.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by handle.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the password hash for a handle, as typed at login.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Apply a partial profile edit, returning the updated profile or `None`
    /// when the user does not exist.
    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError>;
}
