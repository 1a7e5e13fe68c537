//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use microblog::Trace;
#[cfg(debug_assertions)]
use microblog::doc::ApiDoc;
use microblog::inbound::http::health::{HealthState, live, ready};
use microblog::inbound::http::likes::{like_post, unlike_post};
use microblog::inbound::http::posts::{create_post, delete_post, get_post, list_posts, update_post};
use microblog::inbound::http::state::HttpState;
use microblog::inbound::http::users::{
    check_username, current_user, get_user, list_user_posts, login, logout, register,
    update_profile,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const SESSION_TTL_HOURS: i64 = 2;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(
            actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS),
        ))
        .build();

    // `/users/me` must precede `/users/{username}`.
    let api = web::scope("/api/v1")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(check_username)
        .service(current_user)
        .service(update_profile)
        .service(list_user_posts)
        .service(get_user)
        .service(create_post)
        .service(list_posts)
        .service(get_post)
        .service(update_post)
        .service(delete_post)
        .service(like_post)
        .service(unlike_post);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing session, binding and
///   optional database settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the HTTP state, binding the
/// socket or starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
