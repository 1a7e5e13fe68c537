//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login handle.
        username -> Varchar,
        /// Display name shown next to posts.
        name -> Varchar,
        /// Optional profile blurb.
        bio -> Nullable<Varchar>,
        /// Optional avatar URL.
        image_url -> Nullable<Text>,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last profile modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts and replies. Rows are tombstoned through `deleted_at`, never
    /// removed.
    posts (id) {
        /// Primary key issued by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Author of the post.
        user_id -> Uuid,
        /// Parent post for replies; `NULL` for top-level posts.
        parent_id -> Nullable<Int8>,
        /// Post body.
        text -> Text,
        /// Denormalised like counter, kept equal to the number of `likes` rows.
        total_likes -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last text edit timestamp.
        updated_at -> Timestamptz,
        /// Tombstone timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// One row per (post, user) like.
    likes (post_id, user_id) {
        /// Liked post.
        post_id -> Int8,
        /// Liking user.
        user_id -> Uuid,
        /// When the like was recorded.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (user_id));
diesel::joinable!(likes -> posts (post_id));
diesel::joinable!(likes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(likes, posts, users);
