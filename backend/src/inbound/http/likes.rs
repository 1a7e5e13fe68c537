//! Like HTTP handlers.
//!
//! ```text
//! PUT    /api/v1/likes/{postId}
//! DELETE /api/v1/likes/{postId}
//! ```

use actix_web::{delete, put, web};

use crate::domain::LikeReceipt;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, LikeReceiptSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_post_id;

/// Like a post on behalf of the caller.
#[utoipa::path(
    put,
    path = "/api/v1/likes/{postId}",
    params(("postId" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post liked", body = LikeReceiptSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Post not found or deleted", body = ErrorSchema),
        (status = 409, description = "Post already liked", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["likes"],
    operation_id = "likePost",
    security(("SessionCookie" = []))
)]
#[put("/likes/{postId}")]
pub async fn like_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<LikeReceipt>> {
    let user_id = session.require_user_id()?;
    let post_id = parse_post_id(&path.into_inner())?;
    let receipt = state.likes.like_post(post_id, &user_id).await?;
    Ok(web::Json(receipt))
}

/// Withdraw the caller's like.
#[utoipa::path(
    delete,
    path = "/api/v1/likes/{postId}",
    params(("postId" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Like withdrawn", body = LikeReceiptSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Post not found or deleted", body = ErrorSchema),
        (status = 409, description = "Post not liked", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["likes"],
    operation_id = "unlikePost",
    security(("SessionCookie" = []))
)]
#[delete("/likes/{postId}")]
pub async fn unlike_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<LikeReceipt>> {
    let user_id = session.require_user_id()?;
    let post_id = parse_post_id(&path.into_inner())?;
    let receipt = state.likes.unlike_post(post_id, &user_id).await?;
    Ok(web::Json(receipt))
}
