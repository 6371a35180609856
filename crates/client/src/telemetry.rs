//! Subscriber setup for binaries built on this client.
//!
//! The library crates only emit `tracing` events and never install a
//! subscriber; that choice belongs to whichever binary hosts them. The
//! `stocktrack` CLI calls [`init`] first thing in `main` so deployment
//! smoke runs produce machine-readable logs.

use tracing_subscriber::EnvFilter;

/// Install a process-wide JSON-formatted subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info` when the
/// variable is unset or unparsable. Calling this when a subscriber is
/// already installed (unit tests, host applications with their own
/// setup) is a no-op, not an error.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
