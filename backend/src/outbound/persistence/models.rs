//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    AuthoredPost, Bio, DisplayName, ImageUrl, Post, PostId, PostState, PostText, User, UserId,
    Username,
};

use super::schema::{likes, posts, users};

/// Row struct for reading public profile columns from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

impl UserRow {
    /// Validate the stored columns into a domain user.
    pub fn into_domain(self) -> Result<User, String> {
        let username = Username::new(&self.username).map_err(|err| err.to_string())?;
        let name = DisplayName::new(self.name).map_err(|err| err.to_string())?;
        let bio = self
            .bio
            .map(Bio::new)
            .transpose()
            .map_err(|err| err.to_string())?;
        let image_url = self
            .image_url
            .map(ImageUrl::new)
            .transpose()
            .map_err(|err| err.to_string())?;
        Ok(User::new(
            UserId::from_uuid(self.id),
            username,
            name,
            bio,
            image_url,
        ))
    }
}

/// Row struct for credential lookups during login.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialsRow {
    pub id: Uuid,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub name: &'a str,
    pub bio: Option<&'a str>,
    pub password_hash: &'a str,
}

/// Changeset for profile edits. `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileChangeset<'a> {
    pub name: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub user_id: Uuid,
    pub parent_id: Option<i64>,
    pub text: String,
    pub total_likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl PostRow {
    /// Validate the stored columns into a domain post.
    pub fn into_domain(self) -> Result<Post, String> {
        let id = PostId::new(self.id).map_err(|err| err.to_string())?;
        let parent_id = self
            .parent_id
            .map(PostId::new)
            .transpose()
            .map_err(|err| err.to_string())?;
        let text = PostText::new(&self.text).map_err(|err| err.to_string())?;
        let total_likes = u64::try_from(self.total_likes)
            .map_err(|_| format!("post {} has a negative like counter", self.id))?;
        Ok(Post {
            id,
            author_id: UserId::from_uuid(self.user_id),
            parent_id,
            text,
            total_likes,
            state: PostState::from_deleted_at(self.deleted_at),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Convert a joined post and author row pair.
pub(crate) fn authored_post_from_rows(
    (post, author): (PostRow, UserRow),
) -> Result<AuthoredPost, String> {
    Ok(AuthoredPost {
        post: post.into_domain()?,
        author: author.into_domain()?,
    })
}

/// Insertable struct for creating new post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub user_id: Uuid,
    pub parent_id: Option<i64>,
    pub text: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for like records.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = likes)]
pub(crate) struct NewLikeRow {
    pub post_id: i64,
    pub user_id: Uuid,
}
