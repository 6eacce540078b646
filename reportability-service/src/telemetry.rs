//! Telemetry bootstrap (C10): one-time `tracing-subscriber`
//! initialization from the configured `LOG_LEVEL`, run before the HTTP
//! listener binds.

use tracing_subscriber::EnvFilter;

/// Initialize the global `tracing` subscriber. Idempotent within one
/// process only in the sense that `tracing`'s own global-subscriber
/// guard enforces it — calling this twice panics, matching
/// `tracing_subscriber`'s own contract.
pub fn init(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).json().with_target(true).init();
}
