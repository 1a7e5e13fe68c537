//! Process-local repositories used when no database is configured.
//!
//! The three repositories share one [`MemoryStore`], so the domain services
//! run unchanged on top of them and keep their like, delete and reply
//! guards. Contents are lost when the process exits.
//!
//! # Example
//!
//! ```
//! use microblog::outbound::memory::{MemoryLikeRepository, MemoryPostRepository, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let posts = MemoryPostRepository::new(store.clone());
//! let likes = MemoryLikeRepository::new(store);
//! # let _ = (posts, likes);
//! ```

mod memory_like_repository;
mod memory_post_repository;
mod memory_user_repository;
mod store;

pub use memory_like_repository::MemoryLikeRepository;
pub use memory_post_repository::MemoryPostRepository;
pub use memory_user_repository::MemoryUserRepository;
pub use store::MemoryStore;
