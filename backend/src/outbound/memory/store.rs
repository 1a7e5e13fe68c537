//! State shared by the in-memory repositories.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{AuthoredPost, Post, PostId, User, UserId};

/// Stored account: public profile plus the login hash.
#[derive(Debug, Clone)]
pub(super) struct UserRecord {
    pub(super) user: User,
    pub(super) password_hash: String,
}

#[derive(Debug, Default)]
pub(super) struct MemoryState {
    pub(super) users: HashMap<UserId, UserRecord>,
    pub(super) posts: BTreeMap<PostId, Post>,
    pub(super) likes: HashSet<(PostId, UserId)>,
    last_post_id: i64,
}

impl MemoryState {
    /// Issue the next post identifier, mirroring a `BIGSERIAL` sequence.
    pub(super) fn next_post_id(&mut self) -> Option<PostId> {
        self.last_post_id = self.last_post_id.checked_add(1)?;
        PostId::new(self.last_post_id).ok()
    }

    pub(super) fn user_by_username(&self, username: &str) -> Option<&UserRecord> {
        self.users
            .values()
            .find(|record| record.user.username().as_ref() == username)
    }

    /// Join `post` with its author, or `None` when the author is unknown.
    pub(super) fn authored(&self, post: &Post) -> Option<AuthoredPost> {
        self.users.get(&post.author_id).map(|record| AuthoredPost {
            post: post.clone(),
            author: record.user.clone(),
        })
    }
}

/// Users, posts and likes held behind a single mutex.
///
/// Every repository call takes the lock once, so a like-row write and its
/// counter change are observed together or not at all. Clones share the
/// same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Mutations complete under a single guard; poisoned state is consistent.
    pub(super) fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn post_ids_follow_a_sequence() {
        let store = MemoryStore::new();
        let mut state = store.lock();

        let first = state.next_post_id().map(PostId::get);
        let second = state.next_post_id().map(PostId::get);

        assert_eq!((first, second), (Some(1), Some(2)));
    }

    #[rstest]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.lock().next_post_id();

        assert_eq!(other.lock().next_post_id().map(PostId::get), Some(2));
    }
}
