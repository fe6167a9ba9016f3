//! Test utilities for patrex.
//!
//! Helpers shared by the unit and integration suites. Gated behind
//! `cfg(any(test, feature = "test-utils"))`; the integration suite reaches
//! it through the crate's own dev-dependency on itself with the
//! `test-utils` feature enabled.

use std::sync::Once;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests.
static INIT_LOGGING: Once = Once::new();

/// Initialize tracing for tests.
///
/// Initializes the tracing subscriber at most once per process. Respects
/// the `RUST_LOG` environment variable if set, or uses the provided level;
/// with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=patrex=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}
