//! Driving port for user-facing reads.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch profiles and
//! per-user post listings without importing persistence concerns.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, PostView, User, UserId, Username};

use super::fixture_data::{FIXTURE_USERNAME, fixture_post_id, fixture_post_view, fixture_user};

/// Domain use-case port for reading user data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Whether `username` is free to register.
    async fn is_username_available(&self, username: &Username) -> Result<bool, Error>;

    /// Profile of the authenticated user.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;

    /// Public profile for a handle.
    async fn find_by_username(&self, username: &Username) -> Result<User, Error>;

    /// Page through every post written by `username`, newest first.
    async fn list_user_posts(
        &self,
        username: &Username,
        page: &PageRequest,
    ) -> Result<Page<PostView>, Error>;
}

/// Fixture query that knows a single user with a single post.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersQuery;

fn ensure_fixture_username(username: &Username) -> Result<(), Error> {
    if username.as_ref() == FIXTURE_USERNAME {
        Ok(())
    } else {
        Err(Error::not_found(format!("user {username} not found")))
    }
}

#[async_trait]
impl UsersQuery for FixtureUsersQuery {
    async fn is_username_available(&self, username: &Username) -> Result<bool, Error> {
        Ok(username.as_ref() != FIXTURE_USERNAME)
    }

    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        let user = fixture_user()?;
        Ok(User::new(
            *user_id,
            user.username().clone(),
            user.name().clone(),
            user.bio().cloned(),
            user.image_url().cloned(),
        ))
    }

    async fn find_by_username(&self, username: &Username) -> Result<User, Error> {
        ensure_fixture_username(username)?;
        fixture_user()
    }

    async fn list_user_posts(
        &self,
        username: &Username,
        page: &PageRequest,
    ) -> Result<Page<PostView>, Error> {
        ensure_fixture_username(username)?;
        if page.page() > 1 {
            return Ok(Page::new(Vec::new(), page, 1));
        }
        let view = fixture_post_view(fixture_post_id()?, None, "hello")?;
        Ok(Page::new(vec![view], page, 1))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn username(raw: &str) -> Username {
        Username::new(raw).expect("valid username")
    }

    #[rstest]
    #[case("ada", false)]
    #[case("grace", true)]
    #[tokio::test]
    async fn fixture_availability_reserves_fixture_handle(
        #[case] raw: &str,
        #[case] available: bool,
    ) {
        let result = FixtureUsersQuery
            .is_username_available(&username(raw))
            .await
            .expect("fixture lookup succeeds");
        assert_eq!(result, available);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_profile_echoes_requested_id() {
        let user_id = UserId::random();
        let user = FixtureUsersQuery
            .fetch_profile(&user_id)
            .await
            .expect("fixture profile");
        assert_eq!(user.id(), &user_id);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_user_posts_require_known_handle() {
        let err = FixtureUsersQuery
            .list_user_posts(&username("nobody"), &PageRequest::default())
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::NotFound);

        let page = FixtureUsersQuery
            .list_user_posts(&username("ada"), &PageRequest::default())
            .await
            .expect("known user");
        assert_eq!(page.data().len(), 1);
    }
}
