//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, plus the services implementing the driving ports. Keep types
//! immutable and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User and its value types; LoginCredentials, Registration, Password.
//! - Post aggregate: Post, PostState, PostView, PostThread, LikeReceipt.
//! - PostService, LikeService, UserService: driving port implementations.

pub mod auth;
pub mod error;
pub mod like;
pub mod like_service;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Password, PasswordTooShort, Registration,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::like::LikeReceipt;
pub use self::like_service::LikeService;
pub use self::post::{
    AuthoredPost, NewPost, Post, PostContent, PostId, PostState, PostText, PostThread,
    PostValidationError, PostView,
};
pub use self::post_service::PostService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    BIO_MAX, Bio, DISPLAY_NAME_MAX, DISPLAY_NAME_MIN, DisplayName, IMAGE_URL_MAX, ImageUrl,
    ProfileUpdate, USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username,
};
pub use self::user_service::UserService;

