pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod names;
pub(crate) mod run;
pub(crate) mod scan;

use duel_etl_lib::{Config, Overrides};

use crate::CliError;

/// Resolve the run configuration, mapping failures to a CLI error.
pub(crate) fn resolve(overrides: Overrides) -> Result<Config, CliError> {
    duel_etl_lib::settings::load_config(overrides).map_err(|e| {
        CliError::config(format!(
            "{}\nRun 'duel-etl config set-game-path <path>' or pass --game-path.",
            e
        ))
    })
}

/// Build a multi-threaded tokio runtime for one command.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}
