//! CLI module for storefront-rs
//!
//! - Argument parsing with clap
//! - Merging CLI overrides into file-based configuration
//! - Dispatch to the `serve` and `migrate` handlers

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::Settings;
use crate::error::AppResult;
use crate::logger::{LoggerError, init_logger};

/// Load configuration files and apply CLI overrides
///
/// # Errors
/// Returns `AppError::Configuration` naming the offending key when loading,
/// merging or validation fails.
pub fn load_and_merge_config(cli: &Cli) -> AppResult<Settings> {
    let merger = ConfigurationMerger::from_cli(cli)?;
    Ok(merger.merge_cli_args(cli)?)
}

/// Install the global logger described by `settings.logger`
pub fn init_logger_from_settings(settings: &Settings) -> Result<(), LoggerError> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .map_err(|e| LoggerError::config(e.to_string()))?;

    init_logger(logger_config)
}
