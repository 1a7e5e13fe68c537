//! In-memory `PostRepository` implementation.
//!
//! Listings follow the Diesel adapter: newest first (`created_at DESC,
//! id DESC`), and a search term matches active posts only, case-insensitively
//! and without wildcard interpretation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{AuthoredPost, NewPost, Post, PostId, PostState, PostText, UserId};

use super::store::{MemoryState, MemoryStore};

/// [`PostRepository`] backed by a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryPostRepository {
    store: MemoryStore,
}

impl MemoryPostRepository {
    /// Create a repository over `store`.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

/// Which posts a listing covers.
#[derive(Debug, Clone, Copy)]
enum Listing {
    TopLevel,
    RepliesTo(PostId),
    AuthoredBy(UserId),
}

impl Listing {
    fn covers(self, post: &Post) -> bool {
        match self {
            Self::TopLevel => post.parent_id.is_none(),
            Self::RepliesTo(parent) => post.parent_id == Some(parent),
            Self::AuthoredBy(author) => post.author_id == author,
        }
    }
}

fn matches_search(post: &Post, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| {
        post.is_active() && post.text.as_ref().to_lowercase().contains(needle)
    })
}

fn authored(state: &MemoryState, post: &Post) -> Result<AuthoredPost, PostRepositoryError> {
    state
        .authored(post)
        .ok_or_else(|| PostRepositoryError::query(format!("post {} has no author", post.id)))
}

fn active_post_mut(state: &mut MemoryState, id: PostId) -> Option<&mut Post> {
    state.posts.get_mut(&id).filter(|post| post.is_active())
}

impl MemoryPostRepository {
    fn list(
        &self,
        listing: Listing,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError> {
        let state = self.store.lock();
        let needle = page.search().map(str::to_lowercase);
        let mut matching: Vec<&Post> = state
            .posts
            .values()
            .filter(|post| listing.covers(post) && matches_search(post, needle.as_deref()))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let count = u64::try_from(matching.len())
            .map_err(|_| PostRepositoryError::query("row count out of range"))?;
        let offset = usize::try_from(page.offset())
            .map_err(|_| PostRepositoryError::query("page offset out of range"))?;
        let limit = usize::try_from(page.limit())
            .map_err(|_| PostRepositoryError::query("page size out of range"))?;
        let data = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|post| authored(&state, post))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(data, page, count))
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut state = self.store.lock();
        if !state.users.contains_key(&post.author_id) {
            return Err(PostRepositoryError::missing_reference(
                "author does not exist",
            ));
        }
        if post
            .parent_id
            .is_some_and(|parent| !state.posts.contains_key(&parent))
        {
            return Err(PostRepositoryError::missing_reference(
                "parent post does not exist",
            ));
        }

        let id = state
            .next_post_id()
            .ok_or_else(|| PostRepositoryError::query("post id sequence exhausted"))?;
        let created = Post {
            id,
            author_id: post.author_id,
            parent_id: post.parent_id,
            text: post.text.clone(),
            total_likes: 0,
            state: PostState::Active,
            created_at: post.created_at,
            updated_at: post.created_at,
        };
        state.posts.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<AuthoredPost>, PostRepositoryError> {
        let state = self.store.lock();
        state
            .posts
            .get(&id)
            .map(|post| authored(&state, post))
            .transpose()
    }

    async fn update_text(
        &self,
        id: PostId,
        text: &PostText,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut state = self.store.lock();
        Ok(active_post_mut(&mut state, id).map(|post| {
            post.text = text.clone();
            post.updated_at = updated_at;
            post.clone()
        }))
    }

    async fn soft_delete(
        &self,
        id: PostId,
        deleted_at: DateTime<Utc>,
    ) -> Result<bool, PostRepositoryError> {
        let mut state = self.store.lock();
        let deleted = active_post_mut(&mut state, id).map(|post| {
            post.state = PostState::Deleted { at: deleted_at };
            post.updated_at = deleted_at;
        });
        Ok(deleted.is_some())
    }

    async fn list_top_level(
        &self,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError> {
        self.list(Listing::TopLevel, page)
    }

    async fn list_replies(
        &self,
        parent_id: PostId,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError> {
        self.list(Listing::RepliesTo(parent_id), page)
    }

    async fn list_by_author(
        &self,
        author_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError> {
        self.list(Listing::AuthoredBy(*author_id), page)
    }
}

#[cfg(test)]
#[path = "memory_post_repository_tests.rs"]
mod tests;
