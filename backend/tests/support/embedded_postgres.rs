//! Per-test databases on the shared embedded PostgreSQL cluster.
//!
//! The schema is migrated once into a template database named after a hash
//! of `migrations/`, so a changed migration set gets a fresh template. Each
//! test clones the template into its own temporary database, which is
//! dropped with the [`TestDatabase`].

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use microblog::outbound::persistence::{DbPool, MIGRATIONS, PoolConfig};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::cluster_skip::handle_cluster_setup_failure;

static TEMPLATE_LOCK: Mutex<()> = Mutex::new(());

const TEMPLATE_NAME_PREFIX: &str = "microblog_template";
const PROVISION_RETRIES: usize = 5;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);
const POOL_SIZE: u32 = 4;

/// A migrated database owned by one test, with the runtime that drives it.
pub struct TestDatabase {
    runtime: Runtime,
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    /// Drive `future` to completion on this database's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Provision a fresh database, or `None` when the cluster is unavailable and
/// `SKIP_TEST_CLUSTER` is set.
pub fn test_database() -> Option<TestDatabase> {
    match setup() {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn setup() -> Result<TestDatabase, String> {
    ensure_stable_password();
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
    let database = provision_database(cluster)?;
    let config = PoolConfig::new(database.url().to_string()).with_max_size(POOL_SIZE);
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestDatabase {
        runtime,
        pool,
        _database: database,
    })
}

/// Keep `PG_PASSWORD` stable so a reused data directory still accepts the
/// password it was initialised with.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns threads that read
        // the environment.
        unsafe {
            std::env::set_var("PG_PASSWORD", "microblog_embedded_test");
        }
    }
}

fn template_database_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Create the template database and migrate it unless it already exists.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        migrate_schema(&cluster.connection().database_url(&template_name))?;
    }

    Ok(template_name)
}

fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

/// Clone the template into a uniquely named database, retrying while
/// concurrent test binaries contend for the template.
fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::from("no provisioning attempt made");
    for attempt in 1..=PROVISION_RETRIES {
        let cloned = ensure_template_database(cluster).and_then(|template_name| {
            let name = format!("test_{}", Uuid::new_v4().simple());
            cluster
                .temporary_database_from_template(name.as_str(), template_name.as_str())
                .map_err(|err| format!("clone template: {err:?}"))
        });
        match cloned {
            Ok(database) => return Ok(database),
            Err(error) => last_error = format!("attempt {attempt}/{PROVISION_RETRIES}: {error}"),
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}
