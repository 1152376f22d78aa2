//! Subscriber installation.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the JSON subscriber, filtered by `RUST_LOG`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Install the JSON subscriber with an explicit filter directive
/// (e.g. `"mustock_assistant=debug,info"`).
///
/// Fails on a malformed directive or when a global subscriber already exists.
pub fn init_with_filter(directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter directive: {directive:?}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Compact, human-readable output routed through libtest's capture.
///
/// Idempotent, so every test may call it.
pub fn init_for_tests() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_test_writer()
        .try_init();
}
