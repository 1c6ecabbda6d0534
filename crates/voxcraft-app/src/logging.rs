//! Logging bootstrap.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber, honouring `RUST_LOG` and
/// defaulting to `info`.
pub fn init_logging() {
    init_logging_with("info");
}

/// Like [`init_logging`] with a different fallback filter.
///
/// Does nothing if a subscriber is already installed.
pub fn init_logging_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
