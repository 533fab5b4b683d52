#![forbid(unsafe_code)]

//! Logging setup for FloatDock hosts.
//!
//! Filtering follows `RUST_LOG` and falls back to `warn`, so a stock host
//! only sees swallowed errors:
//!
//! - `RUST_LOG=fdock_runtime=debug` - gesture and persistence transitions
//! - `RUST_LOG=fdock_runtime=info` - settles and dock state toggles only
//!
//! With the `tracing-json` feature the output is one JSON object per line.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter built from `RUST_LOG`, or [`DEFAULT_FILTER`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn try_init() -> Result<()> {
    try_init_with(env_filter())
}

/// Install the global subscriber with an explicit filter.
pub fn try_init_with(filter: EnvFilter) -> Result<()> {
    let registry = tracing_subscriber::registry().with(filter);

    #[cfg(feature = "tracing-json")]
    let result = registry
        .with(fmt::layer().json().with_target(true))
        .try_init();

    #[cfg(not(feature = "tracing-json"))]
    let result = registry
        .with(fmt::layer().with_target(true).with_line_number(true))
        .try_init();

    result.map_err(|e| Error::Logging(e.to_string()))
}

/// Install the global subscriber, ignoring an existing one.
pub fn init() {
    if let Err(err) = try_init() {
        tracing::debug!(error = %err, "subscriber already installed");
    }
}
