//! Port for post storage and paginated post listings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::{AuthoredPost, NewPost, Post, PostId, PostText, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// A referenced author or parent row does not exist.
        MissingReference { message: String } => "post references a missing row: {message}",
    }
}

/// Port for reading and writing posts.
///
/// Listings are ordered newest first (`created_at DESC, id DESC`). A search
/// term restricts them to active posts whose text contains it; tombstones
/// are otherwise included so threads stay navigable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post with a zero like counter.
    async fn create(&self, post: &NewPost) -> Result<Post, PostRepositoryError>;

    /// Fetch a post, tombstoned or not, with its author.
    async fn find_by_id(&self, id: PostId) -> Result<Option<AuthoredPost>, PostRepositoryError>;

    /// Replace the text of an active post. Returns `None` when no active post
    /// has this id.
    async fn update_text(
        &self,
        id: PostId,
        text: &PostText,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, PostRepositoryError>;

    /// Tombstone an active post. Returns `false` when no active post has this
    /// id.
    async fn soft_delete(
        &self,
        id: PostId,
        deleted_at: DateTime<Utc>,
    ) -> Result<bool, PostRepositoryError>;

    /// Page through top-level posts.
    async fn list_top_level(
        &self,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError>;

    /// Page through the direct replies of `parent_id`.
    async fn list_replies(
        &self,
        parent_id: PostId,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError>;

    /// Page through every post written by `author_id`, replies included.
    async fn list_by_author(
        &self,
        author_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError>;
}
