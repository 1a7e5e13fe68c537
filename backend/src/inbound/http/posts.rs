//! Post HTTP handlers.
//!
//! ```text
//! POST   /api/v1/posts            {"text":"hello","parentId":null}
//! GET    /api/v1/posts?page=1&perPage=10&search=hel
//! GET    /api/v1/posts/{postId}?page=1&perPage=10
//! PUT    /api/v1/posts/{postId}   {"text":"edited"}
//! DELETE /api/v1/posts/{postId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreatePostRequest, UpdatePostRequest};
use crate::domain::{Error, PostId, PostText, PostThread, PostView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PostPageSchema, PostThreadSchema, PostViewSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, PageQuery, invalid_field_error, parse_page_request, parse_post_id, required,
};

/// Request body for `POST /api/v1/posts`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostBody {
    /// Post text; must not be blank.
    #[schema(example = "hello")]
    pub text: Option<String>,
    /// Post being replied to, if any.
    #[schema(example = 1)]
    pub parent_id: Option<i64>,
}

/// Request body for `PUT /api/v1/posts/{postId}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostBody {
    /// Replacement text; must not be blank.
    #[schema(example = "hello again")]
    pub text: Option<String>,
}

fn parse_text(raw: Option<String>) -> Result<PostText, Error> {
    let field = FieldName::new("text");
    PostText::new(required(raw, field)?).map_err(|err| invalid_field_error(field, err))
}

fn parse_parent_id(raw: Option<i64>) -> Result<Option<PostId>, Error> {
    let field = FieldName::new("parentId");
    raw.map(|id| PostId::new(id).map_err(|err| invalid_field_error(field, err)))
        .transpose()
}

/// Publish a post, or a reply when `parentId` is set.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostBody,
    responses(
        (status = 201, description = "Post created", body = PostViewSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Parent post or author not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost",
    security(("SessionCookie" = []))
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePostBody>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let CreatePostBody { text, parent_id } = payload.into_inner();
    let request = CreatePostRequest {
        author_id,
        text: parse_text(text)?,
        parent_id: parse_parent_id(parent_id)?,
    };
    let view = state.posts_command.create_post(request).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Page through top-level posts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(PageQuery),
    responses(
        (status = 200, description = "Top-level posts", body = PostPageSchema),
        (status = 400, description = "Invalid pagination", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts",
    security([])
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<PostView>>> {
    let page = parse_page_request(query.into_inner())?;
    let posts = state.posts_query.list_posts(&page).await?;
    Ok(web::Json(posts))
}

/// Fetch a post with one page of its direct replies.
///
/// Deleted posts are returned as tombstones so their replies stay reachable.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{postId}",
    params(
        ("postId" = i64, Path, description = "Post identifier"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Post and replies", body = PostThreadSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost",
    security([])
)]
#[get("/posts/{postId}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<PostThread>> {
    let post_id = parse_post_id(&path.into_inner())?;
    let replies = parse_page_request(query.into_inner())?;
    let thread = state.posts_query.get_post(post_id, &replies).await?;
    Ok(web::Json(thread))
}

/// Replace the text of a post the caller wrote.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{postId}",
    params(("postId" = i64, Path, description = "Post identifier")),
    request_body = UpdatePostBody,
    responses(
        (status = 200, description = "Post updated", body = PostViewSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required or not the author", body = ErrorSchema),
        (status = 404, description = "Post not found or deleted", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost",
    security(("SessionCookie" = []))
)]
#[put("/posts/{postId}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdatePostBody>,
) -> ApiResult<web::Json<PostView>> {
    let user_id = session.require_user_id()?;
    let request = UpdatePostRequest {
        user_id,
        post_id: parse_post_id(&path.into_inner())?,
        text: parse_text(payload.into_inner().text)?,
    };
    let view = state.posts_command.update_post(request).await?;
    Ok(web::Json(view))
}

/// Delete a post, leaving a tombstone in its place.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{postId}",
    params(("postId" = i64, Path, description = "Post identifier")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Post not found or already deleted", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost",
    security(("SessionCookie" = []))
)]
#[delete("/posts/{postId}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let post_id = parse_post_id(&path.into_inner())?;
    state.posts_command.delete_post(post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
