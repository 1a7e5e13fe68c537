//! Driving port for post mutations.
//!
//! Inbound adapters call this port to create, edit and delete posts without
//! knowing how posts are stored.

use async_trait::async_trait;

use crate::domain::{Error, PostId, PostText, PostView, UserId};

use super::fixture_data::{fixture_post_id, fixture_post_view, fixture_user_id};

/// Request to publish a post or a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostRequest {
    /// Authenticated author.
    pub author_id: UserId,
    /// Post text.
    pub text: PostText,
    /// Parent post when replying.
    pub parent_id: Option<PostId>,
}

/// Request to replace the text of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePostRequest {
    /// Authenticated caller; must be the author.
    pub user_id: UserId,
    /// Post to edit.
    pub post_id: PostId,
    /// Replacement text.
    pub text: PostText,
}

/// Domain use-case port for post mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Publish a post, or a reply when `parent_id` is set.
    async fn create_post(&self, request: CreatePostRequest) -> Result<PostView, Error>;

    /// Replace a post's text on behalf of its author.
    async fn update_post(&self, request: UpdatePostRequest) -> Result<PostView, Error>;

    /// Tombstone a post.
    async fn delete_post(&self, post_id: PostId) -> Result<(), Error>;
}

/// Fixture command with canned responses for handler tests.
///
/// Creation echoes the request as post 1; edits and deletes only recognise
/// post 1 and only let the fixture user edit it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostsCommand;

#[async_trait]
impl PostsCommand for FixturePostsCommand {
    async fn create_post(&self, request: CreatePostRequest) -> Result<PostView, Error> {
        fixture_post_view(fixture_post_id()?, request.parent_id, request.text.as_ref())
    }

    async fn update_post(&self, request: UpdatePostRequest) -> Result<PostView, Error> {
        if request.post_id != fixture_post_id()? {
            return Err(Error::not_found(format!("post {} not found", request.post_id)));
        }
        if request.user_id != fixture_user_id()? {
            return Err(Error::unauthorized("only the author may edit this post"));
        }
        fixture_post_view(request.post_id, None, request.text.as_ref())
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), Error> {
        if post_id == fixture_post_id()? {
            Ok(())
        } else {
            Err(Error::not_found(format!("post {post_id} not found")))
        }
    }
}
