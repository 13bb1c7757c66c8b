//! Shared helpers for the integration tests.

use tracing_subscriber::EnvFilter;

/// Installs a test subscriber once; `RUST_LOG=heron_json=trace` shows events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
