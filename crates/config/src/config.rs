use std::path::PathBuf;

use plasma_params::RootChainParams;
use plasma_primitives::Address;
use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Account allowed to submit blocks, add tokens and start fee exits.
    pub operator: Address,

    /// Protocol parameters (optional section in TOML).
    #[serde(default)]
    pub params: RootChainParams,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod test {
    use plasma_primitives::WEEK_SECS;

    use super::*;

    #[test]
    fn test_config_load() {
        let config_string = r#"
            operator = "0x00000000000000000000000000000000000000aa"

            [params]
            child_block_interval = 100
            min_exit_delay = 60

            [logging]
            service_label = "dev"
            log_dir = "/tmp/plasma-logs"
            json_format = true
        "#;

        let config = toml::from_str::<Config>(config_string);
        assert!(
            config.is_ok(),
            "should be able to load TOML config but got: {:?}",
            config.err()
        );
        let config = config.unwrap();

        assert_eq!(config.operator, Address::with_last_byte(0xaa));
        assert_eq!(config.params.child_block_interval, 100);
        assert_eq!(config.params.min_exit_delay, 60);
        assert_eq!(config.params.deposit_exit_delay, 2 * WEEK_SECS);
        assert_eq!(config.logging.service_label.as_deref(), Some("dev"));
        assert_eq!(config.logging.json_format, Some(true));
    }

    #[test]
    fn test_minimal_config() {
        let config: Config =
            toml::from_str(r#"operator = "0x0000000000000000000000000000000000000001""#)
                .unwrap();
        assert_eq!(config.params, RootChainParams::default());
        assert!(config.logging.log_dir.is_none());
    }

    #[test]
    fn test_missing_operator() {
        assert!(toml::from_str::<Config>("[params]").is_err());
    }
}
