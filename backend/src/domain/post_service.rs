//! Post domain service.
//!
//! Implements the post driving ports on top of the post and user
//! repositories. Reads include tombstones, rendered through
//! [`PostContent::Tombstoned`](crate::domain::PostContent); mutations and
//! reply creation treat a tombstoned post as absent.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::{debug, info};

use crate::domain::ports::{
    CreatePostRequest, PostRepository, PostRepositoryError, PostsCommand, PostsQuery,
    UpdatePostRequest, UserRepository,
};
use crate::domain::user_service::map_user_persistence_error;
use crate::domain::{AuthoredPost, Error, NewPost, PostId, PostThread, PostView};

/// Post service implementing [`PostsCommand`] and [`PostsQuery`].
#[derive(Clone)]
pub struct PostService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> PostService<P, U> {
    /// Create a new service with the given repositories and clock.
    pub fn new(posts: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            users,
            clock,
        }
    }
}

pub(crate) fn post_not_found(post_id: PostId) -> Error {
    Error::not_found(format!("post {post_id} not found"))
}

pub(crate) fn map_post_repository_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
        PostRepositoryError::MissingReference { message } => Error::not_found(message),
    }
}

impl<P, U> PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn find_active(&self, post_id: PostId) -> Result<AuthoredPost, Error> {
        self.posts
            .find_by_id(post_id)
            .await
            .map_err(map_post_repository_error)?
            .filter(|found| found.post.is_active())
            .ok_or_else(|| post_not_found(post_id))
    }
}

#[async_trait]
impl<P, U> PostsCommand for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn create_post(&self, request: CreatePostRequest) -> Result<PostView, Error> {
        let CreatePostRequest {
            author_id,
            text,
            parent_id,
        } = request;

        let author = self
            .users
            .find_by_id(&author_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("user {author_id} not found")))?;

        if let Some(parent) = parent_id {
            self.find_active(parent).await?;
        }

        let new_post = NewPost {
            author_id,
            parent_id,
            text,
            created_at: self.clock.utc(),
        };
        let post = self
            .posts
            .create(&new_post)
            .await
            .map_err(map_post_repository_error)?;
        debug!(post_id = %post.id, parent_id = ?post.parent_id, "post created");

        Ok(PostView::from(AuthoredPost { post, author }))
    }

    async fn update_post(&self, request: UpdatePostRequest) -> Result<PostView, Error> {
        let UpdatePostRequest {
            user_id,
            post_id,
            text,
        } = request;

        let existing = self.find_active(post_id).await?;
        if !existing.post.is_authored_by(&user_id) {
            return Err(Error::unauthorized("only the author may edit this post"));
        }

        // A concurrent delete between the read and the write surfaces as
        // NotFound.
        let post = self
            .posts
            .update_text(post_id, &text, self.clock.utc())
            .await
            .map_err(map_post_repository_error)?
            .ok_or_else(|| post_not_found(post_id))?;

        Ok(PostView::from(AuthoredPost {
            post,
            author: existing.author,
        }))
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), Error> {
        let deleted = self
            .posts
            .soft_delete(post_id, self.clock.utc())
            .await
            .map_err(map_post_repository_error)?;
        if !deleted {
            return Err(post_not_found(post_id));
        }
        info!(post_id = %post_id, "post tombstoned");
        Ok(())
    }
}

#[async_trait]
impl<P, U> PostsQuery for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn get_post(&self, post_id: PostId, replies: &PageRequest) -> Result<PostThread, Error> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await
            .map_err(map_post_repository_error)?
            .ok_or_else(|| post_not_found(post_id))?;
        let replies = self
            .posts
            .list_replies(post_id, replies)
            .await
            .map_err(map_post_repository_error)?;

        Ok(PostThread {
            post: PostView::from(post),
            replies: replies.map(PostView::from),
        })
    }

    async fn list_posts(&self, page: &PageRequest) -> Result<Page<PostView>, Error> {
        let posts = self
            .posts
            .list_top_level(page)
            .await
            .map_err(map_post_repository_error)?;
        Ok(posts.map(PostView::from))
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
