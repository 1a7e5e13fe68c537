//! Account and profile HTTP handlers.
//!
//! ```text
//! POST  /api/v1/register              {"username":"ada","name":"Ada Lovelace","password":"..."}
//! POST  /api/v1/login                 {"username":"ada","password":"..."}
//! POST  /api/v1/logout
//! POST  /api/v1/users/check-username  {"username":"ada"}
//! GET   /api/v1/users/me
//! PATCH /api/v1/users/me              {"bio":"..."}
//! GET   /api/v1/users/{username}
//! GET   /api/v1/users/{username}/posts?page=1&perPage=10
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Bio, DisplayName, Error, ImageUrl, LoginCredentials, LoginValidationError, Password,
    PostView, ProfileUpdate, Registration, User, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PostPageSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, PageQuery, invalid_field_error, parse_page_request, required,
};

/// Request body for `POST /api/v1/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    /// Unique handle: 3 to 32 letters, digits or underscores.
    #[schema(example = "ada")]
    pub username: Option<String>,
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    /// At least 8 characters.
    #[schema(example = "analytical-engine")]
    pub password: Option<String>,
    /// Optional biography, at most 160 characters.
    pub bio: Option<String>,
}

/// Request body for `POST /api/v1/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    /// Account handle.
    #[schema(example = "ada")]
    pub username: String,
    /// Account password.
    #[schema(example = "analytical-engine")]
    pub password: String,
}

/// Response body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Authenticated user.
    #[schema(format = "uuid")]
    pub user_id: String,
}

/// Request body for `POST /api/v1/users/check-username`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckUsernameBody {
    /// Handle to check.
    #[schema(example = "ada")]
    pub username: Option<String>,
}

/// Response body for `POST /api/v1/users/check-username`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsernameAvailability {
    /// Handle that was checked.
    pub username: String,
    /// Whether the handle is free to register.
    pub available: bool,
}

/// Request body for `PATCH /api/v1/users/me`; absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    /// New display name.
    pub name: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New avatar location.
    pub image_url: Option<String>,
}

fn parse_field<T, E: std::fmt::Display>(
    raw: String,
    field: &'static str,
    parse: impl FnOnce(String) -> Result<T, E>,
) -> Result<T, Error> {
    parse(raw).map_err(|err| invalid_field_error(FieldName::new(field), err))
}

fn parse_username(raw: Option<String>) -> Result<Username, Error> {
    let value = required(raw, FieldName::new("username"))?;
    parse_field(value, "username", Username::new)
}

fn parse_registration(body: RegisterBody) -> Result<Registration, Error> {
    let RegisterBody {
        username,
        name,
        password,
        bio,
    } = body;
    let password = required(password, FieldName::new("password"))?;
    Ok(Registration {
        username: parse_username(username)?,
        name: parse_field(required(name, FieldName::new("name"))?, "name", DisplayName::new)?,
        password: parse_field(password, "password", |raw| Password::new(&raw))?,
        bio: bio
            .map(|raw| parse_field(raw, "bio", Bio::new))
            .transpose()?,
    })
}

fn parse_profile_update(body: UpdateProfileBody) -> Result<ProfileUpdate, Error> {
    let UpdateProfileBody {
        name,
        bio,
        image_url,
    } = body;
    Ok(ProfileUpdate {
        name: name
            .map(|raw| parse_field(raw, "name", DisplayName::new))
            .transpose()?,
        bio: bio.map(|raw| parse_field(raw, "bio", Bio::new)).transpose()?,
        image_url: image_url
            .map(|raw| parse_field(raw, "imageUrl", ImageUrl::new))
            .transpose()?,
    })
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyUsername => ("username", "empty_username"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterBody,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<HttpResponse> {
    let registration = parse_registration(payload.into_inner())?;
    let user = state.users_command.register(registration).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate and establish a session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginBody { username, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&username, &password)
        .map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(web::Json(LoginResponse {
        user_id: user_id.to_string(),
    }))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Report whether a handle is free to register.
#[utoipa::path(
    post,
    path = "/api/v1/users/check-username",
    request_body = CheckUsernameBody,
    responses(
        (status = 200, description = "Availability", body = UsernameAvailability),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "checkUsername",
    security([])
)]
#[post("/users/check-username")]
pub async fn check_username(
    state: web::Data<HttpState>,
    payload: web::Json<CheckUsernameBody>,
) -> ApiResult<web::Json<UsernameAvailability>> {
    let username = parse_username(payload.into_inner().username)?;
    let available = state.users_query.is_username_available(&username).await?;
    Ok(web::Json(UsernameAvailability {
        username: username.into(),
        available,
    }))
}

/// Profile of the logged-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.users_query.fetch_profile(&user_id).await?;
    Ok(web::Json(user))
}

/// Edit the logged-in user's profile.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Updated profile", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile",
    security(("SessionCookie" = []))
)]
#[patch("/users/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateProfileBody>,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let update = parse_profile_update(payload.into_inner())?;
    let user = state.users_command.update_profile(&user_id, update).await?;
    Ok(web::Json(user))
}

/// Public profile for a handle.
#[utoipa::path(
    get,
    path = "/api/v1/users/{username}",
    params(("username" = String, Path, description = "Account handle")),
    responses(
        (status = 200, description = "User profile", body = UserSchema),
        (status = 400, description = "Invalid username", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{username}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let username = parse_username(Some(path.into_inner()))?;
    let user = state.users_query.find_by_username(&username).await?;
    Ok(web::Json(user))
}

/// Page through a user's posts and replies, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{username}/posts",
    params(("username" = String, Path, description = "Account handle"), PageQuery),
    responses(
        (status = 200, description = "Posts by the user", body = PostPageSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUserPosts",
    security([])
)]
#[get("/users/{username}/posts")]
pub async fn list_user_posts(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<PostView>>> {
    let username = parse_username(Some(path.into_inner()))?;
    let page = parse_page_request(query.into_inner())?;
    let posts = state.users_query.list_user_posts(&username, &page).await?;
    Ok(web::Json(posts))
}
