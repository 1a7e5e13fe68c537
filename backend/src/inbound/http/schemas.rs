//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework agnostic and do not derive `ToSchema`. The
//! wrappers below mirror their wire shape and register under the domain
//! type's path via `#[schema(as = ...)]`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication is missing or the caller does not own the resource.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with current state, e.g. a duplicate like.
    #[schema(rename = "conflict")]
    Conflict,
    /// The database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Unexpected server failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "post 42 not found")]
    message: String,
    /// Trace identifier of the failed request.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Unique handle.
    #[schema(example = "ada")]
    username: String,
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Short biography.
    bio: Option<String>,
    /// Avatar location.
    image_url: Option<String>,
}

/// OpenAPI schema for [`crate::domain::PostView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PostView, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PostViewSchema {
    /// Post identifier.
    #[schema(example = 42)]
    id: i64,
    /// Parent post for replies.
    parent_id: Option<i64>,
    /// Number of likes.
    #[schema(example = 3)]
    total_likes: u64,
    /// Whether the post has been deleted.
    is_deleted: bool,
    /// Post text; empty for deleted posts.
    #[schema(example = "hello")]
    text: String,
    /// Author; `null` for deleted posts.
    user: Option<UserSchema>,
    /// Creation time.
    created_at: chrono::DateTime<chrono::Utc>,
    /// Last change.
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// OpenAPI schema for [`pagination::PageMeta`].
#[derive(ToSchema)]
#[schema(as = pagination::PageMeta, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PageMetaSchema {
    /// One-based page number.
    #[schema(example = 1)]
    page: u32,
    /// Page size.
    #[schema(example = 10)]
    per_page: u32,
    /// Total matches across all pages.
    #[schema(example = 11)]
    count: u64,
    /// Last page holding items; zero when nothing matched.
    #[schema(example = 2)]
    max_page: u64,
}

/// OpenAPI schema for a page of posts.
#[derive(ToSchema)]
#[schema(as = crate::domain::PostPage)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PostPageSchema {
    /// Posts on this page.
    data: Vec<PostViewSchema>,
    /// Position of the page in the full listing.
    meta: PageMetaSchema,
}

/// OpenAPI schema for [`crate::domain::PostThread`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PostThread)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PostThreadSchema {
    /// The requested post.
    post: PostViewSchema,
    /// One page of direct replies, newest first.
    replies: PostPageSchema,
}

/// OpenAPI schema for [`crate::domain::LikeReceipt`].
#[derive(ToSchema)]
#[schema(as = crate::domain::LikeReceipt, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct LikeReceiptSchema {
    /// Post whose counter changed.
    #[schema(example = 42)]
    post_id: i64,
    /// Counter after the change.
    #[schema(example = 4)]
    total_likes: u64,
}
