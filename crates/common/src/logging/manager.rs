//! Logging initialization.

use thiserror::Error;
use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use super::types::LoggerConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Initializes the logging subsystem with the provided config.
///
/// Defaults to INFO, overridable through `RUST_LOG`.  Fails if a global
/// subscriber is already installed.
pub fn init(config: LoggerConfig) -> Result<(), LoggingError> {
    let filt = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    // Configure stdout logging with JSON or compact format
    let stdout_sub = if config.stdout_config.json_format {
        layer()
            .json()
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed()
    } else {
        layer()
            .compact()
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed()
    };

    // Build optional file logging layer
    let file_layer = config.file_logging_config.as_ref().map(|file_config| {
        let file_appender = RollingFileAppender::new(
            file_config.rotation.clone(),
            &file_config.directory,
            &file_config.file_name_prefix,
        );

        if file_config.json_format {
            layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(filt.clone())
                .boxed()
        } else {
            layer()
                .compact()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(filt.clone())
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .try_init()?;

    info!(service_name = %config.service_name, "logging initialized");
    Ok(())
}
