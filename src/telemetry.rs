use crate::config::{LogFormat, ObservabilityConfig};
use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging on stderr.
///
/// `RUST_LOG` takes precedence over the configured level; `verbose` forces
/// `debug` so raw git diagnostics become visible.
pub fn init_telemetry(observability: &ObservabilityConfig, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&observability.level))?
    };

    let registry = tracing_subscriber::registry().with(filter);
    match observability.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    tracing::debug!("submit50-classroom telemetry initialized");
    Ok(())
}
