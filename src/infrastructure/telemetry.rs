//! # Telemetry
//!
//! Installs the global `tracing` subscriber.
//!
//! `RUST_LOG` wins over [`LoggingSettings::level`] when set.

use crate::application::error::{InfrastructureError, InfrastructureResult};
use crate::infrastructure::config::LoggingSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Builds the log filter from `RUST_LOG` or `settings.level`.
///
/// # Errors
///
/// Returns `InfrastructureError::Configuration` if `settings.level` is not
/// a valid filter directive.
pub fn env_filter(settings: &LoggingSettings) -> InfrastructureResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.level).map_err(|e| {
            InfrastructureError::configuration(format!("logging.level {:?}: {e}", settings.level))
        }),
    }
}

/// Installs the global subscriber. Call once, from the binary.
///
/// # Errors
///
/// Returns `InfrastructureError::Configuration` if the filter is invalid or
/// a global subscriber is already installed.
pub fn init_tracing(settings: &LoggingSettings) -> InfrastructureResult<()> {
    let filter = env_filter(settings)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if settings.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    installed.map_err(|e| InfrastructureError::configuration(format!("tracing init: {e}")))
}
