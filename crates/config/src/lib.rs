//! Configuration of the root chain simulator.

mod config;

pub use config::{Config, LoggingConfig};
