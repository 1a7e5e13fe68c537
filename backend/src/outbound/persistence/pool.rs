//! Async connection pool for Diesel PostgreSQL connections.
//!
//! Wraps `diesel-async` and `bb8` so repositories can check out an
//! `AsyncPgConnection` without blocking the runtime.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Errors raised while building the pool or checking out connections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout {
        /// Underlying pool diagnostic.
        message: String,
    },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build {
        /// Underlying pool diagnostic.
        message: String,
    },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_MIN_IDLE: u32 = 1;
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the database connection pool.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use microblog::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://microblog@localhost/microblog")
///     .with_max_size(20)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a configuration for `database_url` with ten connections, one
    /// idle connection and a 30 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: Some(DEFAULT_MIN_IDLE),
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Set the maximum number of connections in the pool.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    /// Set the minimum number of idle connections to maintain.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Database URL the pool connects to.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum number of pooled connections.
    #[must_use]
    pub const fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Cloneable handle to the shared `bb8` pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. `bb8` opens `min_idle` connections eagerly, so an
    /// unreachable database fails here rather than on the first request.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the pool cannot be constructed.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        let min_idle = config.min_idle.map(|idle| idle.min(config.max_size));

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection becomes available
    /// within the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn defaults_apply() {
        let config = PoolConfig::new("postgres://localhost/microblog");

        assert_eq!(config.database_url(), "postgres://localhost/microblog");
        assert_eq!(config.max_size(), DEFAULT_MAX_SIZE);
        assert_eq!(config.min_idle, Some(DEFAULT_MIN_IDLE));
        assert_eq!(config.connection_timeout, DEFAULT_CONNECTION_TIMEOUT);
    }

    #[rstest]
    #[case(20, 20)]
    #[case(0, 1)]
    fn max_size_is_at_least_one(#[case] requested: u32, #[case] expected: u32) {
        let config = PoolConfig::new("postgres://localhost/microblog").with_max_size(requested);

        assert_eq!(config.max_size(), expected);
    }

    #[rstest]
    fn errors_keep_diagnostics() {
        assert!(
            PoolError::checkout("connection refused")
                .to_string()
                .contains("connection refused")
        );
        assert!(PoolError::build("invalid URL").to_string().contains("invalid URL"));
    }
}
