//! Process-wide logging setup

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured level.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match logging.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}
