//! Like domain service.
//!
//! Guards the per-(post, user) like state machine: `not liked -> liked` via
//! [`LikesCommand::like_post`] and `liked -> not liked` via
//! [`LikesCommand::unlike_post`]. The repository applies the like-row write
//! and the counter delta in one transaction; this service adds the
//! existence pre-checks and maps failures onto the domain taxonomy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::ports::{LikeRepository, LikeRepositoryError, LikesCommand, PostRepository};
use crate::domain::post_service::{map_post_repository_error, post_not_found};
use crate::domain::{Error, LikeReceipt, PostId, UserId};

/// Like service implementing [`LikesCommand`].
#[derive(Clone)]
pub struct LikeService<L, P> {
    likes: Arc<L>,
    posts: Arc<P>,
}

impl<L, P> LikeService<L, P> {
    /// Create a new service with the given repositories.
    pub const fn new(likes: Arc<L>, posts: Arc<P>) -> Self {
        Self { likes, posts }
    }
}

fn map_like_repository_error(error: LikeRepositoryError) -> Error {
    match error {
        LikeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("like repository unavailable: {message}"))
        }
        LikeRepositoryError::Query { message } => {
            Error::internal(format!("like repository error: {message}"))
        }
        LikeRepositoryError::PostNotFound { post_id } => {
            Error::not_found(format!("post {post_id} not found"))
        }
        LikeRepositoryError::AlreadyLiked { post_id } => {
            Error::conflict(format!("post {post_id} is already liked"))
        }
        LikeRepositoryError::NotLiked { post_id } => {
            Error::conflict(format!("post {post_id} is not liked"))
        }
        LikeRepositoryError::CounterUnderflow { post_id } => {
            error!(post_id, "like counter diverged from likes table");
            Error::internal(format!("like counter for post {post_id} is out of sync"))
        }
    }
}

impl<L, P> LikeService<L, P>
where
    L: LikeRepository,
    P: PostRepository,
{
    async fn ensure_active_post(&self, post_id: PostId) -> Result<(), Error> {
        let active = self
            .posts
            .find_by_id(post_id)
            .await
            .map_err(map_post_repository_error)?
            .is_some_and(|found| found.post.is_active());
        if active {
            Ok(())
        } else {
            Err(post_not_found(post_id))
        }
    }

    async fn is_liked(&self, post_id: PostId, user_id: &UserId) -> Result<bool, Error> {
        self.likes
            .exists(post_id, user_id)
            .await
            .map_err(map_like_repository_error)
    }
}

#[async_trait]
impl<L, P> LikesCommand for LikeService<L, P>
where
    L: LikeRepository,
    P: PostRepository,
{
    async fn like_post(&self, post_id: PostId, user_id: &UserId) -> Result<LikeReceipt, Error> {
        self.ensure_active_post(post_id).await?;
        if self.is_liked(post_id, user_id).await? {
            return Err(map_like_repository_error(
                LikeRepositoryError::already_liked(post_id),
            ));
        }

        let total_likes = self
            .likes
            .like(post_id, user_id)
            .await
            .map_err(map_like_repository_error)?;
        Ok(LikeReceipt {
            post_id,
            total_likes,
        })
    }

    async fn unlike_post(&self, post_id: PostId, user_id: &UserId) -> Result<LikeReceipt, Error> {
        self.ensure_active_post(post_id).await?;
        if !self.is_liked(post_id, user_id).await? {
            return Err(map_like_repository_error(LikeRepositoryError::not_liked(
                post_id,
            )));
        }

        let total_likes = self
            .likes
            .unlike(post_id, user_id)
            .await
            .map_err(map_like_repository_error)?;
        Ok(LikeReceipt {
            post_id,
            total_likes,
        })
    }
}

#[cfg(test)]
#[path = "like_service_tests.rs"]
mod tests;
