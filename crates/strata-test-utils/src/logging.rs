//! Opt-in tracing output for tests.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a subscriber that writes through the test harness.
///
/// Uses `RUST_LOG` when set and `warn` otherwise. Safe to call from every
/// test; only the first call in a process installs anything.
pub fn init() {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_test_writer()
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
