//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test};

use crate::domain::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;

/// Session middleware with a fresh key, cookie name `session` and the
/// `Secure` flag off so plain-HTTP test requests round-trip it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `res`.
///
/// # Panics
///
/// Panics when the response does not set the cookie.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// User id stored by [`open_test_session`]; matches the fixture user.
pub const TEST_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// `GET /test-session`: log in as [`TEST_USER_ID`] without credentials.
#[actix_web::get("/test-session")]
pub async fn open_test_session(session: SessionContext) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(TEST_USER_ID)
        .map_err(|err| crate::domain::Error::internal(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Log in through [`open_test_session`] and return the session cookie.
pub async fn login_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, test::TestRequest::get().uri("/test-session").to_request()).await;
    session_cookie(&res)
}

/// Body of `res` as JSON, or `null` when empty.
pub async fn json_body(res: ServiceResponse) -> serde_json::Value {
    let body = test::read_body(res).await;
    if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    }
}
