//! Tracing bootstrap
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! host's job. `init_logging` is the convenience the Python module calls on
//! import, and tests may call it too. It never panics and is a no-op once a
//! global subscriber exists.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "milestone_treasury_core_rs=info";

/// Install a formatted subscriber filtered by `RUST_LOG`, else `default_filter`
///
/// Returns `true` if this call installed the subscriber, `false` if one was
/// already in place.
pub fn init_logging(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
