//! User account domain service.
//!
//! Implements registration, login, profile reads and edits, and per-user
//! post listings. Password hashing runs on the blocking thread pool so the
//! Argon2 work never stalls the async workers.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, NewUser, PasswordHashError, PasswordHasher, PostRepository,
    UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::post_service::map_post_repository_error;
use crate::domain::{
    Error, LoginCredentials, PostView, ProfileUpdate, Registration, User, UserId, Username,
};

/// User service implementing [`UsersCommand`], [`UsersQuery`] and
/// [`LoginService`].
#[derive(Clone)]
pub struct UserService<U, H, P> {
    users: Arc<U>,
    hasher: Arc<H>,
    posts: Arc<P>,
}

impl<U, H, P> UserService<U, H, P> {
    /// Create a new service with the given repositories and hasher.
    pub const fn new(users: Arc<U>, hasher: Arc<H>, posts: Arc<P>) -> Self {
        Self {
            users,
            hasher,
            posts,
        }
    }
}

/// Map user persistence failures onto the domain taxonomy.
pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username {username} is already taken"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn user_not_found(what: impl std::fmt::Display) -> Error {
    Error::not_found(format!("user {what} not found"))
}

impl<U, H, P> UserService<U, H, P>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    P: PostRepository,
{
    async fn with_hasher<T, F>(&self, op: F) -> Result<T, Error>
    where
        F: FnOnce(&H) -> Result<T, PasswordHashError> + Send + 'static,
        T: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || op(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }

    async fn require_by_username(&self, username: &Username) -> Result<User, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| user_not_found(username))
    }
}

#[async_trait]
impl<U, H, P> UsersCommand for UserService<U, H, P>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    P: PostRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let Registration {
            username,
            name,
            password,
            bio,
        } = registration;

        let taken = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?
            .is_some();
        if taken {
            return Err(map_user_persistence_error(
                UserPersistenceError::duplicate_username(username.to_string()),
            ));
        }

        let password_hash = self
            .with_hasher(move |hasher| hasher.hash(&password))
            .await?;
        let new_user = NewUser {
            id: UserId::random(),
            username,
            name,
            bio,
            password_hash,
        };
        let user = self
            .users
            .create(&new_user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        if update.is_empty() {
            return self.fetch_profile(user_id).await;
        }
        self.users
            .update_profile(user_id, &update)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| user_not_found(user_id))
    }
}

#[async_trait]
impl<U, H, P> UsersQuery for UserService<U, H, P>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    P: PostRepository,
{
    async fn is_username_available(&self, username: &Username) -> Result<bool, Error> {
        let existing = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_persistence_error)?;
        Ok(existing.is_none())
    }

    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn find_by_username(&self, username: &Username) -> Result<User, Error> {
        self.require_by_username(username).await
    }

    async fn list_user_posts(
        &self,
        username: &Username,
        page: &PageRequest,
    ) -> Result<Page<PostView>, Error> {
        let user = self.require_by_username(username).await?;
        let posts = self
            .posts
            .list_by_author(user.id(), page)
            .await
            .map_err(map_post_repository_error)?;
        Ok(posts.map(PostView::from))
    }
}

#[async_trait]
impl<U, H, P> LoginService for UserService<U, H, P>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    P: PostRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(stored) = self
            .users
            .find_credentials(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
        else {
            return Err(invalid_credentials());
        };

        let candidate = Zeroizing::new(credentials.password().to_owned());
        let stored_hash = stored.password_hash;
        let verified = self
            .with_hasher(move |hasher| hasher.verify(&candidate, &stored_hash))
            .await?;
        if verified {
            Ok(stored.user_id)
        } else {
            Err(invalid_credentials())
        }
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
