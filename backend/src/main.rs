//! Backend entry-point: loads configuration, prepares persistence and serves
//! the REST API.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use microblog::inbound::http::health::HealthState;
use microblog::inbound::http::session_config::{BuildMode, session_settings_from_env};
use microblog::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let build_mode = BuildMode::current();
    let session = session_settings_from_env(&DefaultEnv::new(), build_mode)
        .map_err(|err| io::Error::other(err.to_string()))?;
    info!(
        fingerprint = %session.fingerprint(),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let bind_addr = settings.bind_addr();
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    match connect_database(&settings, build_mode).await? {
        Some(pool) => config = config.with_db_pool(pool),
        None => warn!("no database configured; serving an in-memory store"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config).await?.await
}

/// Apply migrations and open the pool when a database URL is configured.
async fn connect_database(
    settings: &AppSettings,
    build_mode: BuildMode,
) -> io::Result<Option<DbPool>> {
    let Some(database_url) = settings
        .required_database_url(build_mode)
        .map_err(io::Error::other)?
    else {
        return Ok(None);
    };

    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .map_err(|err| io::Error::other(err.to_string()))?;
    }

    let pool_config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| io::Error::other(err.to_string()))?;
    Ok(Some(pool))
}
