use std::io;

use tracing_subscriber::{fmt, EnvFilter};

/// Logs go to stderr; stdout is reserved for the inventory document.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
