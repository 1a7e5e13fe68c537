//! Driving port for account mutations: registration and profile edits.

use async_trait::async_trait;

use crate::domain::{Error, ProfileUpdate, Registration, User, UserId};

use super::fixture_data::{FIXTURE_USERNAME, fixture_user};

/// Domain use-case port for account changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create an account and return its public profile.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Apply a partial profile edit for the authenticated user.
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate)
    -> Result<User, Error>;
}

/// Fixture command that treats the fixture handle as taken and echoes every
/// other registration back.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersCommand;

#[async_trait]
impl UsersCommand for FixtureUsersCommand {
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        if registration.username.as_ref() == FIXTURE_USERNAME {
            return Err(Error::conflict(format!(
                "username {} is already taken",
                registration.username
            )));
        }
        Ok(User::new(
            UserId::random(),
            registration.username,
            registration.name,
            registration.bio,
            None,
        ))
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        let current = fixture_user()?;
        let ProfileUpdate {
            name,
            bio,
            image_url,
        } = update;
        Ok(User::new(
            *user_id,
            current.username().clone(),
            name.unwrap_or_else(|| current.name().clone()),
            bio.or_else(|| current.bio().cloned()),
            image_url.or_else(|| current.image_url().cloned()),
        ))
    }
}
