//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] registers every handler under `/api/v1` plus the health
//! probes, the schema wrappers from [`crate::inbound::http::schemas`], and
//! the session cookie security scheme. Swagger UI serves it in debug builds
//! and `cargo run --bin openapi-dump` prints it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::posts::{CreatePostBody, UpdatePostBody};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, LikeReceiptSchema, PageMetaSchema, PostPageSchema,
    PostThreadSchema, PostViewSchema, UserSchema,
};
use crate::inbound::http::users::{
    CheckUsernameBody, LoginBody, LoginResponse, RegisterBody, UpdateProfileBody,
    UsernameAvailability,
};

/// Adds the `SessionCookie` security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Microblog backend API",
        description = "Posts, replies, likes and user profiles behind a cookie session."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::check_username,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_user_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::likes::like_post,
        crate::inbound::http::likes::unlike_post,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        PostViewSchema,
        PageMetaSchema,
        PostPageSchema,
        PostThreadSchema,
        LikeReceiptSchema,
        RegisterBody,
        LoginBody,
        LoginResponse,
        CheckUsernameBody,
        UsernameAvailability,
        UpdateProfileBody,
        CreatePostBody,
        UpdatePostBody,
    )),
    tags(
        (name = "users", description = "Accounts, sessions and profiles"),
        (name = "posts", description = "Posts and replies"),
        (name = "likes", description = "Liking and unliking posts"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
