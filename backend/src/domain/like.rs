//! Like relationship between a user and a post.

use serde::Serialize;

use super::PostId;

/// Outcome of a like or unlike: the post and its counter after the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeReceipt {
    /// Post whose counter changed.
    pub post_id: PostId,
    /// Counter value committed with the like row change.
    pub total_likes: u64,
}
