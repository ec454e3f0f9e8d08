use tracing_subscriber::EnvFilter;

use crate::error::{Result, ViewError};

/// Log to stderr so rendered frames on stdout stay clean. `RUST_LOG`
/// overrides the default `warn` level.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ViewError::Logging(e.to_string()))
}
