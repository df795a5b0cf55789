use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber for the service.
///
/// `RUST_LOG` takes precedence; otherwise everything logs at `info` with
/// request tracing from `tower_http` included. Output is compact and goes
/// to stdout. Safe to call more than once (later calls are no-ops), which
/// keeps tests that spin up the router from panicking.
pub fn init_logging_default() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}
