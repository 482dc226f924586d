//! Installs the global tracing subscriber for the studio.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing_subscriber::util::TryInitError),
}

/// Logs to stdout. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(build_env_filter(default_filter))
        .with(fmt::layer().with_target(false))
        .try_init()?;
    Ok(())
}

fn build_env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
