//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process, filtered via `RUST_LOG` (default
/// `info`). JSON output when `TRADEFEED_LOG_JSON` is set, plain fmt
/// otherwise.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if std::env::var_os("TRADEFEED_LOG_JSON").is_some() {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
