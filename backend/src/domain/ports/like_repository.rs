//! Port for the likes table and the like counter it drives.
//!
//! `like` and `unlike` each pair the like-row write with the matching
//! counter change on the post inside one transaction. Nothing else may
//! touch `total_likes`.

use async_trait::async_trait;

use crate::domain::{PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by like repository adapters.
    pub enum LikeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "like repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "like repository query failed: {message}",
        /// The post is missing or tombstoned.
        PostNotFound { post_id: i64 } => "post {post_id} not found",
        /// The user already likes the post.
        AlreadyLiked { post_id: i64 } => "post {post_id} is already liked",
        /// The user does not like the post.
        NotLiked { post_id: i64 } => "post {post_id} is not liked",
        /// The counter was already zero while a like row existed.
        CounterUnderflow { post_id: i64 } => "like counter for post {post_id} would go negative",
    }
}

/// Port for like storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Whether `user_id` currently likes `post_id`.
    async fn exists(&self, post_id: PostId, user_id: &UserId) -> Result<bool, LikeRepositoryError>;

    /// Insert the like and increment the counter by one, atomically.
    /// Returns the new counter value.
    async fn like(&self, post_id: PostId, user_id: &UserId) -> Result<u64, LikeRepositoryError>;

    /// Delete the like and decrement the counter by one, atomically.
    /// Returns the new counter value.
    async fn unlike(&self, post_id: PostId, user_id: &UserId) -> Result<u64, LikeRepositoryError>;
}
