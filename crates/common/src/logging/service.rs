//! Common logging initialization for binaries.

use std::path::PathBuf;

use tracing::info;

use super::{FileLoggingConfig, LoggerConfig, LoggingError, format_service_name, init};

/// Configuration parameters for logging initialization.
#[derive(Debug)]
pub struct LoggingInitConfig<'a> {
    /// Base service name
    pub service_base_name: &'a str,
    /// Optional service label to append like prod or dev
    pub service_label: Option<&'a str>,
    /// Directory for file-based logging
    pub log_dir: Option<&'a PathBuf>,
    /// Prefix for log file names
    pub log_file_prefix: Option<&'a str>,
    /// Use JSON format instead of compact
    pub json_format: Option<bool>,
    /// Default log file prefix if not specified in config
    pub default_log_prefix: &'a str,
}

/// Builds the [`LoggerConfig`] a binary would initialize logging with.
pub fn build_logger_config(config: &LoggingInitConfig<'_>) -> LoggerConfig {
    let service_name = format_service_name(config.service_base_name, config.service_label);
    let mut lconfig = LoggerConfig::new(service_name);

    if let Some(dir) = config.log_dir {
        let prefix = config
            .log_file_prefix
            .unwrap_or(config.default_log_prefix)
            .to_string();
        let file_config = FileLoggingConfig::new(dir.clone(), prefix)
            .with_json_format(config.json_format.unwrap_or(false));
        lconfig = lconfig.with_file_logging(file_config);
    }

    if let Some(json_format) = config.json_format {
        lconfig = lconfig.with_json_logging(json_format);
    }

    lconfig
}

/// Initialize logging from configuration with all standard setup.
pub fn init_logging_from_config(config: LoggingInitConfig<'_>) -> Result<(), LoggingError> {
    let lconfig = build_logger_config(&config);
    let file_logging_config = lconfig.file_logging_config.clone();

    init(lconfig)?;

    if let Some(file_config) = &file_logging_config {
        info!(
            log_dir = %file_config.directory.display(),
            log_prefix = %file_config.file_name_prefix,
            "file logging enabled"
        );
    }

    Ok(())
}
