//! In-memory `LikeRepository` implementation.
//!
//! The like set and the post counter change under one store lock, matching
//! the transactional guarantee of the Diesel adapter.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{LikeRepository, LikeRepositoryError};
use crate::domain::{Post, PostId, UserId};

use super::store::{MemoryState, MemoryStore};

/// [`LikeRepository`] backed by a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryLikeRepository {
    store: MemoryStore,
}

impl MemoryLikeRepository {
    /// Create a repository over `store`.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn active_post(state: &mut MemoryState, post_id: PostId) -> Result<&mut Post, LikeRepositoryError> {
    state
        .posts
        .get_mut(&post_id)
        .filter(|post| post.is_active())
        .ok_or_else(|| LikeRepositoryError::post_not_found(post_id.get()))
}

#[async_trait]
impl LikeRepository for MemoryLikeRepository {
    async fn exists(&self, post_id: PostId, user_id: &UserId) -> Result<bool, LikeRepositoryError> {
        Ok(self.store.lock().likes.contains(&(post_id, *user_id)))
    }

    async fn like(&self, post_id: PostId, user_id: &UserId) -> Result<u64, LikeRepositoryError> {
        let mut guard = self.store.lock();
        let state = &mut *guard;
        let key = (post_id, *user_id);
        let liked = state.likes.contains(&key);
        let post = active_post(state, post_id)?;
        if liked {
            return Err(LikeRepositoryError::already_liked(post_id.get()));
        }
        let total = post
            .total_likes
            .checked_add(1)
            .ok_or_else(|| LikeRepositoryError::query("like counter overflow"))?;

        post.total_likes = total;
        state.likes.insert(key);
        debug!(post_id = post_id.get(), total_likes = total, "post liked");
        Ok(total)
    }

    async fn unlike(&self, post_id: PostId, user_id: &UserId) -> Result<u64, LikeRepositoryError> {
        let mut guard = self.store.lock();
        let state = &mut *guard;
        let key = (post_id, *user_id);
        let liked = state.likes.contains(&key);
        let post = active_post(state, post_id)?;
        if !liked {
            return Err(LikeRepositoryError::not_liked(post_id.get()));
        }
        let total = post
            .total_likes
            .checked_sub(1)
            .ok_or_else(|| LikeRepositoryError::counter_underflow(post_id.get()))?;

        post.total_likes = total;
        state.likes.remove(&key);
        debug!(post_id = post_id.get(), total_likes = total, "post unliked");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{NewUser, PostRepository, UserRepository};
    use crate::domain::{DisplayName, NewPost, PostText, Username};
    use crate::outbound::memory::{MemoryPostRepository, MemoryUserRepository};

    struct Seeded {
        likes: MemoryLikeRepository,
        posts: MemoryPostRepository,
        post_id: PostId,
        user_id: UserId,
    }

    async fn seeded() -> Seeded {
        let store = MemoryStore::new();
        let users = MemoryUserRepository::new(store.clone());
        let posts = MemoryPostRepository::new(store.clone());
        let user_id = UserId::random();
        users
            .create(&NewUser {
                id: user_id,
                username: Username::new("liker").expect("valid username"),
                name: DisplayName::new("Liker").expect("valid name"),
                bio: None,
                password_hash: "hash".to_owned(),
            })
            .await
            .expect("user created");
        let post = posts
            .create(&NewPost {
                author_id: user_id,
                parent_id: None,
                text: PostText::new("hello").expect("valid text"),
                created_at: Utc::now(),
            })
            .await
            .expect("post created");
        Seeded {
            likes: MemoryLikeRepository::new(store),
            posts,
            post_id: post.id,
            user_id,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn like_and_unlike_move_the_counter_by_one() {
        let seeded = seeded().await;

        let liked = seeded.likes.like(seeded.post_id, &seeded.user_id).await;
        assert_eq!(liked, Ok(1));
        assert_eq!(
            seeded.likes.exists(seeded.post_id, &seeded.user_id).await,
            Ok(true)
        );

        let unliked = seeded.likes.unlike(seeded.post_id, &seeded.user_id).await;
        assert_eq!(unliked, Ok(0));
        assert_eq!(
            seeded.likes.exists(seeded.post_id, &seeded.user_id).await,
            Ok(false)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn repeated_transitions_are_rejected_without_touching_the_counter() {
        let seeded = seeded().await;

        assert_eq!(
            seeded.likes.unlike(seeded.post_id, &seeded.user_id).await,
            Err(LikeRepositoryError::not_liked(seeded.post_id.get()))
        );
        seeded
            .likes
            .like(seeded.post_id, &seeded.user_id)
            .await
            .expect("first like");
        assert_eq!(
            seeded.likes.like(seeded.post_id, &seeded.user_id).await,
            Err(LikeRepositoryError::already_liked(seeded.post_id.get()))
        );

        let post = seeded
            .posts
            .find_by_id(seeded.post_id)
            .await
            .expect("lookup")
            .expect("post exists");
        assert_eq!(post.post.total_likes, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn tombstoned_posts_cannot_be_liked() {
        let seeded = seeded().await;
        seeded
            .posts
            .soft_delete(seeded.post_id, Utc::now())
            .await
            .expect("delete");

        assert_eq!(
            seeded.likes.like(seeded.post_id, &seeded.user_id).await,
            Err(LikeRepositoryError::post_not_found(seeded.post_id.get()))
        );
    }
}
