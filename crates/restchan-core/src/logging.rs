use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, errors::Error, Result};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `Config::log_filter` when set. Calling this twice is an
/// error because a global subscriber is already installed.
pub fn init(service_name: &str, cfg: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_filter))
        .map_err(|e| Error::Config(format!("invalid log filter {:?}: {e}", cfg.log_filter)))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(cfg.log_ansi)
        .try_init()
        .map_err(|e| Error::External(format!("{service_name}: logging init failed: {e}")))?;

    tracing::debug!(service = service_name, "logging initialised");
    Ok(())
}
