//! Driving port for liking and unliking posts.

use async_trait::async_trait;

use crate::domain::{Error, LikeReceipt, PostId, UserId};

use super::fixture_data::fixture_post_id;

/// Domain use-case port for like state changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikesCommand: Send + Sync {
    /// Record that `user_id` likes `post_id`.
    async fn like_post(&self, post_id: PostId, user_id: &UserId) -> Result<LikeReceipt, Error>;

    /// Withdraw a like previously recorded by `user_id`.
    async fn unlike_post(&self, post_id: PostId, user_id: &UserId) -> Result<LikeReceipt, Error>;
}

/// Fixture command that accepts likes on post 1 without remembering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLikesCommand;

fn ensure_fixture_post(post_id: PostId) -> Result<(), Error> {
    if post_id == fixture_post_id()? {
        Ok(())
    } else {
        Err(Error::not_found(format!("post {post_id} not found")))
    }
}

#[async_trait]
impl LikesCommand for FixtureLikesCommand {
    async fn like_post(&self, post_id: PostId, _user_id: &UserId) -> Result<LikeReceipt, Error> {
        ensure_fixture_post(post_id)?;
        Ok(LikeReceipt {
            post_id,
            total_likes: 1,
        })
    }

    async fn unlike_post(&self, post_id: PostId, _user_id: &UserId) -> Result<LikeReceipt, Error> {
        ensure_fixture_post(post_id)?;
        Ok(LikeReceipt {
            post_id,
            total_likes: 0,
        })
    }
}
