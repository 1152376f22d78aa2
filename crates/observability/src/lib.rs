//! Tracing setup for hosts embedding the assistant.
//!
//! Library crates only emit events; the host picks one of these entry points
//! once at startup.

/// Initialize process-wide JSON logging filtered by `RUST_LOG` (default `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

pub use self::tracing::{init_for_tests, init_with_filter};

/// Subscriber construction (filters, formatting).
pub mod tracing;
