//! Driving port for credential checks.
//!
//! Handlers exchange a username and password for a [`UserId`] here and
//! never see how credentials are stored.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

use super::fixture_data::{FIXTURE_USERNAME, fixture_user_id};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Canned authenticator for handler tests.
///
/// `ada` / `password` authenticates as the fixture user; anything else is
/// rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == FIXTURE_USERNAME && credentials.password() == "password" {
            fixture_user_id()
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
