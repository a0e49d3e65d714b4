//! Offline driver for the root chain exit game.

use std::{fs, process};

use anyhow::{Context, anyhow};
use plasma_common::logging::{self, LoggingInitConfig};
use plasma_config::Config;
use tracing::*;

mod args;
mod context;
mod position;
mod replay;
mod scenario;

use crate::{
    args::{Args, Subcommand},
    scenario::Scenario,
};

fn main() {
    let args: Args = argh::from_env();

    let inner = || -> anyhow::Result<()> {
        match &args.subc {
            Subcommand::Position(subc) => {
                let info = position::exec_position(&subc.cmd)?;
                println!("{}", serde_json::to_string_pretty(&info)?);
            }

            Subcommand::Replay(subc) => {
                let config_path = args
                    .config
                    .as_ref()
                    .ok_or_else(|| anyhow!("replay requires a config (-c)"))?;
                let config = context::load_config(config_path)?;
                init_logging(&config)?;

                let raw = fs::read_to_string(&subc.path)
                    .with_context(|| format!("reading scenario {}", subc.path.display()))?;
                let scenario: Scenario =
                    serde_json::from_str(&raw).context("parsing scenario")?;

                info!(
                    operator = %config.operator,
                    steps = scenario.steps.len(),
                    "starting replay"
                );
                let report =
                    replay::run_scenario(config.operator, config.params, &scenario, subc.strict)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }

        Ok(())
    };

    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let lconfig = &config.logging;
    logging::init_logging_from_config(LoggingInitConfig {
        service_base_name: "plasma-sim",
        service_label: lconfig.service_label.as_deref(),
        log_dir: lconfig.log_dir.as_ref(),
        log_file_prefix: lconfig.log_file_prefix.as_deref(),
        json_format: lconfig.json_format,
        default_log_prefix: "plasma-sim",
    })?;
    Ok(())
}
