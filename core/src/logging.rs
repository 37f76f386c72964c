//! Global tracing subscriber setup.

use std::io;

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG`; `LOG_FORMAT=json` switches to JSON lines. Safe to call
/// more than once, later calls are no-ops.
pub fn init_logging() {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stdout);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
