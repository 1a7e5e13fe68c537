//! Embedded schema migrations.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Could not open the migration connection.
    #[error("failed to connect for migrations: {message}")]
    Connect {
        /// Underlying connection diagnostic.
        message: String,
    },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply {
        /// Underlying migration diagnostic.
        message: String,
    },
}

/// Apply pending migrations on a blocking thread and return how many ran.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let database_url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_blocking(&database_url))
        .await
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })??;
    info!(applied, "database migrations applied");
    Ok(applied)
}

fn apply_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let versions = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(versions.len())
}
