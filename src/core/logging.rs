//! Tracing setup
//!
//! Log lines carry a bracketed subsystem tag (`[ENGINE]`, `[AI]`, ...) so a
//! filter like `RUST_LOG=xfchess_board=debug` plus grep is enough to follow
//! one subsystem.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber
///
/// `RUST_LOG` wins over `default_filter`. Calling this again once a
/// subscriber is installed does nothing.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
