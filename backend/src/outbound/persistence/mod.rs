//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and a `bb8` connection pool.
//!
//! - Repositories only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every database failure is mapped to the owning port's error type.
//!
//! # Example
//!
//! ```no_run
//! use microblog::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/microblog")).await?;
//! let posts = DieselPostRepository::new(pool);
//! # let _ = posts;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_like_repository;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_like_repository::DieselLikeRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
