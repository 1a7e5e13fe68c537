//! Deterministic records served by the fixture driving ports.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{
    AuthoredPost, Bio, DisplayName, Error, Post, PostId, PostState, PostText, PostView, User,
    UserId, Username,
};

pub(super) const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
pub(super) const FIXTURE_USERNAME: &str = "ada";
pub(super) const FIXTURE_POST_ID: i64 = 1;

fn fixture_error(what: &str, err: impl std::fmt::Display) -> Error {
    Error::internal(format!("invalid fixture {what}: {err}"))
}

pub(super) fn fixture_timestamp() -> Result<DateTime<Utc>, Error> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .ok_or_else(|| Error::internal("invalid fixture timestamp"))
}

pub(super) fn fixture_user_id() -> Result<UserId, Error> {
    UserId::new(FIXTURE_USER_ID).map_err(|err| fixture_error("user id", err))
}

pub(super) fn fixture_user() -> Result<User, Error> {
    let username = Username::new(FIXTURE_USERNAME).map_err(|err| fixture_error("username", err))?;
    let name = DisplayName::new("Ada Lovelace").map_err(|err| fixture_error("name", err))?;
    let bio = Bio::new("Writing the first programs.").map_err(|err| fixture_error("bio", err))?;
    Ok(User::new(fixture_user_id()?, username, name, Some(bio), None))
}

pub(super) fn fixture_post_id() -> Result<PostId, Error> {
    PostId::new(FIXTURE_POST_ID).map_err(|err| fixture_error("post id", err))
}

pub(super) fn fixture_post_view(
    id: PostId,
    parent_id: Option<PostId>,
    text: &str,
) -> Result<PostView, Error> {
    let author = fixture_user()?;
    let created_at = fixture_timestamp()?;
    let post = Post {
        id,
        author_id: *author.id(),
        parent_id,
        text: PostText::new(text).map_err(|err| fixture_error("post text", err))?,
        total_likes: 0,
        state: PostState::Active,
        created_at,
        updated_at: created_at,
    };
    Ok(PostView::from(AuthoredPost { post, author }))
}
