//! Subcommands and the configuration shared by them.

use std::path::Path;

use anyhow::Context;
use imuframe_common::config::{AppConfig, LoggingConfig};

pub mod convert;
pub mod inspect;

/// Load `--config` if given, otherwise start from defaults.
pub fn load_app_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Apply `--verbose` / `--log-json` on top of the configured logging.
pub fn resolve_logging(mut config: LoggingConfig, verbose: bool, json: bool) -> LoggingConfig {
    if verbose {
        config.level = "debug".to_string();
    }
    config.json |= json;
    config
}
