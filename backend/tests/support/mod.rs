//! Embedded PostgreSQL helpers for the Diesel integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! cluster bootstrap and database provisioning live here. Each test gets its
//! own temporary database on the process-wide shared cluster, migrated with
//! the service's embedded migrations.

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};

const EMBEDDED_PASSWORD: &str = "ledger_embedded_test";

/// Returns true when `SKIP_TEST_CLUSTER` is set to "1", "true" or "yes"
/// (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles embedded cluster setup failures consistently across suites.
///
/// When `SKIP_TEST_CLUSTER` is truthy, prints a skip marker and returns `None`.
/// Otherwise panics so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Returns the shared embedded cluster, bootstrapping it on first use.
///
/// `PG_PASSWORD` is pinned for the bootstrap when unset, so a reused data
/// directory keeps accepting the password it was initialised with.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _password_guard = std::env::var_os("PG_PASSWORD")
        .is_none()
        .then(|| env_lock::lock_env([("PG_PASSWORD", Some(EMBEDDED_PASSWORD))]));
    pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("bootstrap embedded cluster: {err:?}"))
}

/// Creates an empty temporary database on `cluster`.
///
/// The database is dropped when the returned guard goes out of scope.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    cluster
        .create_temporary_database()
        .map_err(|err| format!("create temporary database: {err:?}"))
}
