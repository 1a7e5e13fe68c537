//! Driving port for post reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, PostId, PostThread, PostView};

use super::fixture_data::{fixture_post_id, fixture_post_view};

/// Domain use-case port for reading posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Fetch a post with one page of its direct replies.
    async fn get_post(&self, post_id: PostId, replies: &PageRequest) -> Result<PostThread, Error>;

    /// Page through top-level posts, optionally filtered by `page.search()`.
    async fn list_posts(&self, page: &PageRequest) -> Result<Page<PostView>, Error>;
}

/// Fixture query serving a single top-level post without replies.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostsQuery;

const FIXTURE_TEXT: &str = "hello";

#[async_trait]
impl PostsQuery for FixturePostsQuery {
    async fn get_post(&self, post_id: PostId, replies: &PageRequest) -> Result<PostThread, Error> {
        if post_id != fixture_post_id()? {
            return Err(Error::not_found(format!("post {post_id} not found")));
        }
        Ok(PostThread {
            post: fixture_post_view(post_id, None, FIXTURE_TEXT)?,
            replies: Page::empty(replies),
        })
    }

    async fn list_posts(&self, page: &PageRequest) -> Result<Page<PostView>, Error> {
        let matches = page.search().is_none_or(|term| FIXTURE_TEXT.contains(term));
        if !matches || page.page() > 1 {
            let count = u64::from(matches);
            return Ok(Page::new(Vec::new(), page, count));
        }
        let view = fixture_post_view(fixture_post_id()?, None, FIXTURE_TEXT)?;
        Ok(Page::new(vec![view], page, 1))
    }
}
