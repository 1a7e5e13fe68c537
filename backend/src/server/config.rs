//! HTTP server configuration object and helpers.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use actix_web::cookie::{Key, SameSite};
use microblog::inbound::http::session_config::BuildMode;
use microblog::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Raised when a release build starts without a database URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("MICROBLOG_DATABASE_URL must be set in release builds")]
pub struct DatabaseRequired;

/// Process-level settings loaded from `MICROBLOG_*` variables, config files
/// and the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MICROBLOG")]
pub struct AppSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Debug builds fall back to an in-memory
    /// store when absent; release builds refuse to start.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Socket address assembled from `host` and `port`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Configured database URL; release builds must provide one.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseRequired`] when `mode` is [`BuildMode::Release`]
    /// and no URL is set.
    pub fn required_database_url(&self, mode: BuildMode) -> Result<Option<&str>, DatabaseRequired> {
        match (self.database_url(), mode) {
            (None, BuildMode::Release) => Err(DatabaseRequired),
            (url, _) => Ok(url),
        }
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and a bind
    /// address.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool. When present, the services run
    /// over the Diesel repositories instead of an in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "read by tests; startup logs AppSettings directly")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
