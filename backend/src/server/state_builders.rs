//! Builders for HTTP state: domain services over Diesel or in-memory
//! repositories.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use microblog::domain::ports::{
    CreatePostRequest, LikeRepository, PostRepository, UserRepository,
};
use microblog::domain::{
    DisplayName, Error, LikeService, Password, PostService, PostText, Registration, UserService,
    Username,
};
use microblog::inbound::http::state::{HttpState, HttpStatePorts};
use microblog::outbound::memory::{
    MemoryLikeRepository, MemoryPostRepository, MemoryStore, MemoryUserRepository,
};
use microblog::outbound::persistence::{
    DieselLikeRepository, DieselPostRepository, DieselUserRepository,
};
use microblog::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

const DEMO_USERNAME: &str = "ada";
const DEMO_NAME: &str = "Ada Lovelace";
const DEMO_PASSWORD: &str = "password";
const DEMO_POST: &str = "Hello from the microblog";

/// Wire every driving port to the domain services over one set of
/// repositories.
fn http_state_over<P, U, L>(posts: Arc<P>, users: Arc<U>, likes: Arc<L>) -> HttpState
where
    P: PostRepository + 'static,
    U: UserRepository + 'static,
    L: LikeRepository + 'static,
{
    let user_service = Arc::new(UserService::new(
        users.clone(),
        Arc::new(Argon2PasswordHasher::new()),
        posts.clone(),
    ));
    let post_service = Arc::new(PostService::new(
        posts.clone(),
        users,
        Arc::new(DefaultClock),
    ));
    let like_service = Arc::new(LikeService::new(likes, posts));

    HttpState::new(HttpStatePorts {
        login: user_service.clone(),
        users_command: user_service.clone(),
        users_query: user_service,
        posts_command: post_service.clone(),
        posts_query: post_service,
        likes: like_service,
    })
}

fn invalid_seed(err: impl std::fmt::Display) -> Error {
    Error::internal(format!("invalid demo data: {err}"))
}

/// Register the demo account and its first post through the services.
async fn seed_demo_content(state: &HttpState) -> Result<(), Error> {
    let user = state
        .users_command
        .register(Registration {
            username: Username::new(DEMO_USERNAME).map_err(invalid_seed)?,
            name: DisplayName::new(DEMO_NAME).map_err(invalid_seed)?,
            password: Password::new(DEMO_PASSWORD).map_err(invalid_seed)?,
            bio: None,
        })
        .await?;
    state
        .posts_command
        .create_post(CreatePostRequest {
            author_id: *user.id(),
            text: PostText::new(DEMO_POST).map_err(invalid_seed)?,
            parent_id: None,
        })
        .await?;
    info!(username = DEMO_USERNAME, "seeded in-memory store");
    Ok(())
}

/// Build the shared HTTP state.
///
/// With a pool the services run over the Diesel repositories. Without one
/// they run over a fresh [`MemoryStore`] holding a demo account
/// (`ada` / `password`) and one post.
///
/// # Errors
///
/// Returns an [`Error`] when seeding the in-memory store fails.
pub(super) async fn build_http_state(config: &ServerConfig) -> Result<web::Data<HttpState>, Error> {
    let state = match &config.db_pool {
        Some(pool) => http_state_over(
            Arc::new(DieselPostRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselLikeRepository::new(pool.clone())),
        ),
        None => {
            let store = MemoryStore::new();
            let state = http_state_over(
                Arc::new(MemoryPostRepository::new(store.clone())),
                Arc::new(MemoryUserRepository::new(store.clone())),
                Arc::new(MemoryLikeRepository::new(store)),
            );
            seed_demo_content(&state).await?;
            state
        }
    };
    Ok(web::Data::new(state))
}
