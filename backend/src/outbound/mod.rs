//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local repositories for running without a database
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **security**: Argon2 password hashing
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
