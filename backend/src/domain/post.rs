//! Post aggregate: top-level posts, replies and their soft-deletion state.
//!
//! A post is a top-level entry when `parent_id` is `None` and a reply
//! otherwise. Rows are never physically removed; deletion records a
//! tombstone and readers render the post through [`PostContent::Tombstoned`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pagination::Page;
use serde::{Deserialize, Serialize, Serializer};

use super::{User, UserId};

/// Validation errors returned by post value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Identifiers are issued from a positive sequence.
    #[error("post id must be a positive integer")]
    InvalidId,
    /// Text was empty once trimmed.
    #[error("text must not be empty")]
    EmptyText,
}

/// Post identifier issued by the store's monotonic sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PostId(i64);

impl PostId {
    /// Validate and wrap a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PostValidationError::InvalidId`] for zero or negative values.
    pub const fn new(raw: i64) -> Result<Self, PostValidationError> {
        if raw <= 0 {
            return Err(PostValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = PostValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .parse::<i64>()
            .map_err(|_| PostValidationError::InvalidId)?;
        Self::new(raw)
    }
}

impl TryFrom<i64> for PostId {
    type Error = PostValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostId> for i64 {
    fn from(value: PostId) -> Self {
        value.0
    }
}

/// Post body text, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostText(String);

impl PostText {
    /// Validate and construct post text.
    ///
    /// # Errors
    ///
    /// Returns [`PostValidationError::EmptyText`] when nothing remains after
    /// trimming.
    pub fn new(text: impl AsRef<str>) -> Result<Self, PostValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PostValidationError::EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PostText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PostText> for String {
    fn from(value: PostText) -> Self {
        value.0
    }
}

impl TryFrom<String> for PostText {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle of a post row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostState {
    /// Visible and mutable.
    Active,
    /// Soft-deleted at the given instant.
    Deleted {
        /// When the tombstone was recorded.
        at: DateTime<Utc>,
    },
}

impl PostState {
    /// Build the state from the nullable `deleted_at` column.
    #[must_use]
    pub const fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Self::Deleted { at },
            None => Self::Active,
        }
    }

    /// Tombstone timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Deleted { at } => Some(*at),
        }
    }
}

/// Stored post.
///
/// ## Invariants
/// - `total_likes` equals the number of like rows for `id`.
/// - A `Some` parent referenced an active post when this post was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Sequence-issued identifier.
    pub id: PostId,
    /// Author; immutable after creation.
    pub author_id: UserId,
    /// Parent post for replies.
    pub parent_id: Option<PostId>,
    /// Current text.
    pub text: PostText,
    /// Denormalised like counter.
    pub total_likes: u64,
    /// Active or tombstoned.
    pub state: PostState,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last text change or deletion.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Whether the post has not been deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, PostState::Active)
    }

    /// Whether `user_id` wrote this post.
    #[must_use]
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }
}

/// Insert payload for a new post. Counters start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Author of the post.
    pub author_id: UserId,
    /// Parent for replies.
    pub parent_id: Option<PostId>,
    /// Initial text.
    pub text: PostText,
    /// Creation instant, also used as the first `updated_at`.
    pub created_at: DateTime<Utc>,
}

/// A post joined with its author's public profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredPost {
    /// Stored post.
    pub post: Post,
    /// Public profile of `post.author_id`.
    pub author: User,
}

/// What readers are allowed to see of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContent {
    /// Active post with its text and author.
    Visible {
        /// Post text.
        text: PostText,
        /// Author profile.
        author: User,
    },
    /// Deleted post; text and author are suppressed.
    Tombstoned {
        /// When the post was deleted.
        deleted_at: DateTime<Utc>,
    },
}

/// Read model returned by post queries and commands.
///
/// Serialises as `{ id, parentId, totalLikes, isDeleted, text, user,
/// createdAt, updatedAt }`. Tombstones carry an empty `text` and a `null`
/// `user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    /// Post identifier.
    pub id: PostId,
    /// Parent identifier for replies.
    pub parent_id: Option<PostId>,
    /// Like counter.
    pub total_likes: u64,
    /// Visible or tombstoned content.
    pub content: PostContent,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last change instant.
    pub updated_at: DateTime<Utc>,
}

impl PostView {
    /// Whether the view is a tombstone.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self.content, PostContent::Tombstoned { .. })
    }

    /// Visible text, or `""` for tombstones.
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.content {
            PostContent::Visible { text, .. } => text.as_ref(),
            PostContent::Tombstoned { .. } => "",
        }
    }

    /// Author profile for visible posts.
    #[must_use]
    pub const fn author(&self) -> Option<&User> {
        match &self.content {
            PostContent::Visible { author, .. } => Some(author),
            PostContent::Tombstoned { .. } => None,
        }
    }
}

impl From<AuthoredPost> for PostView {
    fn from(value: AuthoredPost) -> Self {
        let AuthoredPost { post, author } = value;
        let content = match post.state {
            PostState::Active => PostContent::Visible {
                text: post.text,
                author,
            },
            PostState::Deleted { at } => PostContent::Tombstoned { deleted_at: at },
        };
        Self {
            id: post.id,
            parent_id: post.parent_id,
            total_likes: post.total_likes,
            content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostViewBody<'a> {
    id: PostId,
    parent_id: Option<PostId>,
    total_likes: u64,
    is_deleted: bool,
    text: &'a str,
    user: Option<&'a User>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Serialize for PostView {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        PostViewBody {
            id: self.id,
            parent_id: self.parent_id,
            total_likes: self.total_likes,
            is_deleted: self.is_deleted(),
            text: self.text(),
            user: self.author(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .serialize(serializer)
    }
}

/// A post with one page of its direct replies, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostThread {
    /// The requested post, possibly tombstoned.
    pub post: PostView,
    /// Direct replies.
    pub replies: Page<PostView>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{DisplayName, Username};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    #[fixture]
    fn author() -> User {
        User::new(
            UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
            Username::new("ada").expect("fixture username"),
            DisplayName::new("Ada Lovelace").expect("fixture name"),
            None,
            None,
        )
    }

    fn post(state: PostState, author: &User) -> AuthoredPost {
        AuthoredPost {
            post: Post {
                id: PostId::new(2).expect("valid id"),
                author_id: *author.id(),
                parent_id: Some(PostId::new(1).expect("valid id")),
                text: PostText::new("hi").expect("valid text"),
                total_likes: 3,
                state,
                created_at: at(0),
                updated_at: at(60),
            },
            author: author.clone(),
        }
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn post_id_rejects_non_positive(#[case] raw: i64) {
        assert_eq!(PostId::new(raw), Err(PostValidationError::InvalidId));
    }

    #[rstest]
    #[case("17", Ok(17))]
    #[case("abc", Err(PostValidationError::InvalidId))]
    #[case("0", Err(PostValidationError::InvalidId))]
    fn post_id_parses_path_segments(
        #[case] raw: &str,
        #[case] expected: Result<i64, PostValidationError>,
    ) {
        assert_eq!(raw.parse::<PostId>().map(PostId::get), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   \n\t")]
    fn post_text_rejects_blank(#[case] raw: &str) {
        assert_eq!(PostText::new(raw), Err(PostValidationError::EmptyText));
    }

    #[rstest]
    fn post_text_is_trimmed() {
        assert_eq!(PostText::new("  hello ").expect("valid").as_ref(), "hello");
    }

    #[rstest]
    fn state_maps_deleted_at_column() {
        assert_eq!(PostState::from_deleted_at(None), PostState::Active);
        assert_eq!(
            PostState::from_deleted_at(Some(at(5))),
            PostState::Deleted { at: at(5) }
        );
        assert_eq!(PostState::Deleted { at: at(5) }.deleted_at(), Some(at(5)));
    }

    #[rstest]
    fn active_post_renders_visible_view(author: User) {
        let view = PostView::from(post(PostState::Active, &author));
        let value = serde_json::to_value(&view).expect("view serialises");
        assert_eq!(
            value,
            json!({
                "id": 2,
                "parentId": 1,
                "totalLikes": 3,
                "isDeleted": false,
                "text": "hi",
                "user": {
                    "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                    "username": "ada",
                    "name": "Ada Lovelace",
                    "bio": null,
                    "imageUrl": null
                },
                "createdAt": "1970-01-01T00:00:00Z",
                "updatedAt": "1970-01-01T00:01:00Z"
            })
        );
    }

    #[rstest]
    fn deleted_post_renders_tombstone(author: User) {
        let view = PostView::from(post(PostState::Deleted { at: at(90) }, &author));
        assert!(view.is_deleted());
        assert_eq!(view.text(), "");
        assert!(view.author().is_none());

        let value = serde_json::to_value(&view).expect("view serialises");
        assert_eq!(value["isDeleted"], json!(true));
        assert_eq!(value["text"], json!(""));
        assert_eq!(value["user"], json!(null));
    }
}
