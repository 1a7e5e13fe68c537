//! Shared helpers for PostgreSQL-backed integration tests.
//!
//! Suites run against an embedded cluster provisioned by
//! `pg-embed-setup-unpriv`. Every test gets its own database cloned from a
//! migrated template, so cases never observe each other's rows.

mod cluster_skip;
mod embedded_postgres;

pub use embedded_postgres::{TestDatabase, test_database};
