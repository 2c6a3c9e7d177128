//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "products_api=info,tower_http=info";

/// Install the global `tracing` subscriber.
///
/// Verbosity follows `RUST_LOG` (e.g. `RUST_LOG=products_api=debug`),
/// falling back to [`DEFAULT_FILTER`]. Calling this twice is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
