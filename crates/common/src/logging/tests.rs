//! Unit tests for the logging subsystem.

use std::path::PathBuf;

use tracing_subscriber::fmt::format::FmtSpan;

use super::{service::build_logger_config, *};

#[test]
fn test_format_service_name() {
    assert_eq!(format_service_name("plasma-sim", None), "plasma-sim");
    assert_eq!(format_service_name("plasma-sim", Some("dev")), "plasma-sim%dev");
}

#[test]
fn test_logger_config_builder_pattern() {
    let config = LoggerConfig::new("test-service".to_string())
        .with_json_logging(true)
        .with_fmt_span(FmtSpan::CLOSE)
        .with_file_logging(
            FileLoggingConfig::new(PathBuf::from("/tmp/logs"), "test".to_string())
                .with_rotation(Rotation::HOURLY)
                .with_json_format(true),
        );

    assert_eq!(config.service_name, "test-service");
    assert!(config.stdout_config.json_format);
    assert_eq!(config.stdout_config.fmt_span, FmtSpan::CLOSE);

    let file = config.file_logging_config.unwrap();
    assert_eq!(file.directory, PathBuf::from("/tmp/logs"));
    assert_eq!(file.file_name_prefix, "test");
    assert!(file.json_format);
}

#[test]
fn test_default_logger_config() {
    let config = LoggerConfig::default();
    assert!(!config.stdout_config.json_format);
    assert!(config.file_logging_config.is_none());
}

#[test]
fn test_build_from_init_config() {
    let dir = PathBuf::from("/var/log/plasma");
    let init = LoggingInitConfig {
        service_base_name: "plasma-sim",
        service_label: Some("prod"),
        log_dir: Some(&dir),
        log_file_prefix: None,
        json_format: None,
        default_log_prefix: "plasma-sim",
    };

    let config = build_logger_config(&init);
    assert_eq!(config.service_name, "plasma-sim%prod");
    assert!(!config.stdout_config.json_format);

    let file = config.file_logging_config.unwrap();
    assert_eq!(file.directory, dir);
    assert_eq!(file.file_name_prefix, "plasma-sim");
}

#[test]
fn test_build_without_file_logging() {
    let init = LoggingInitConfig {
        service_base_name: "plasma-sim",
        service_label: None,
        log_dir: None,
        log_file_prefix: Some("ignored"),
        json_format: Some(true),
        default_log_prefix: "plasma-sim",
    };

    let config = build_logger_config(&init);
    assert!(config.file_logging_config.is_none());
    assert!(config.stdout_config.json_format);
}
