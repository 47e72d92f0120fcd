//! Logging setup
//!
//! The crate emits `tracing` events; embedders that have no subscriber of
//! their own can install the default one here.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, with `default_level`
/// added as a directive.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(default_level: tracing::Level) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .try_init()
        .is_ok()
}
