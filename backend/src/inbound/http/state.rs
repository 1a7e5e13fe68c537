//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLikesCommand, FixtureLoginService, FixturePostsCommand, FixturePostsQuery,
    FixtureUsersCommand, FixtureUsersQuery, LikesCommand, LoginService, PostsCommand, PostsQuery,
    UsersCommand, UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub posts_command: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub likes: Arc<dyn LikesCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub posts_command: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub likes: Arc<dyn LikesCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            users_command,
            users_query,
            posts_command,
            posts_query,
            likes,
        } = ports;
        Self {
            login,
            users_command,
            users_query,
            posts_command,
            posts_query,
            likes,
        }
    }
}

impl HttpState {
    /// Construct state from a port bundle.
    ///
    /// # Examples
    /// ```
    /// use microblog::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixtures();
    /// let _ = state.posts_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        Self::from(ports)
    }

    /// State backed by the canned fixture ports, for handler tests.
    pub fn fixtures() -> Self {
        Self::new(HttpStatePorts {
            login: Arc::new(FixtureLoginService),
            users_command: Arc::new(FixtureUsersCommand),
            users_query: Arc::new(FixtureUsersQuery),
            posts_command: Arc::new(FixturePostsCommand),
            posts_query: Arc::new(FixturePostsQuery),
            likes: Arc::new(FixtureLikesCommand),
        })
    }
}
