//! Configuration loading.

use std::{fs, path::Path};

use anyhow::Context;
use plasma_config::Config;

pub(crate) fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&config_str)
}

pub(crate) fn parse_config(config_str: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(config_str).context("parsing config")?;
    config
        .params
        .check_well_formed()
        .context("malformed params")?;
    Ok(config)
}
