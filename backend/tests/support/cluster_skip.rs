//! Opt-in skipping for suites that need the embedded PostgreSQL cluster.
//!
//! Cluster setup failures fail the test unless `SKIP_TEST_CLUSTER` is set,
//! so a broken environment is never mistaken for a passing suite.

/// Whether `SKIP_TEST_CLUSTER` is set to `1`, `true` or `yes`
/// (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Print a skip marker and return `None` when skipping is enabled; panic
/// otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
