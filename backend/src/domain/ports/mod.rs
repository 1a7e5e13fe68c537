//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`, [`LoginService`])
//! are implemented by domain services and called by inbound adapters; each
//! has a `Fixture*` implementation with canned responses for handler tests.

mod macros;
pub(crate) use macros::define_port_error;

mod fixture_data;
mod like_repository;
mod likes_command;
mod login_service;
mod password_hasher;
mod post_repository;
mod posts_command;
mod posts_query;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use like_repository::MockLikeRepository;
pub use like_repository::{LikeRepository, LikeRepositoryError};
#[cfg(test)]
pub use likes_command::MockLikesCommand;
pub use likes_command::{FixtureLikesCommand, LikesCommand};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::{CreatePostRequest, FixturePostsCommand, PostsCommand, UpdatePostRequest};
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::{FixturePostsQuery, PostsQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, StoredCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{FixtureUsersCommand, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{FixtureUsersQuery, UsersQuery};
