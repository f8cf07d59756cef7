use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use duel_etl_core::{Dataset, ManifestReader};
use duel_etl_lib::checkpoint::write_ids;
use duel_etl_lib::{Config, Overrides, list_directories};

use crate::CliError;
use crate::spinner::ScanSpinner;

/// Scan every bundle directory and write `ids.json`.
pub(crate) fn run_scan(overrides: Overrides, quiet: bool) -> Result<(), CliError> {
    let config = super::resolve(overrides)?;
    scan(&config, quiet)?;
    Ok(())
}

/// Scan stage shared with `run`. Returns the merged dataset after it has
/// been checkpointed.
pub(crate) fn scan(config: &Config, quiet: bool) -> Result<Dataset, CliError> {
    let directories = list_directories(&config.game_path, Some(&config.streaming_path))
        .map_err(|e| CliError::scan(e.to_string()))?;
    if directories.is_empty() {
        log::warn!(
            "No bundle directories found under {}",
            config.game_path.display()
        );
    }
    log::debug!(
        "Reading bundle manifests from {}",
        config.manifest_dir.display()
    );

    let reader = Arc::new(ManifestReader::new(&config.manifest_dir));
    let progress = Arc::new(ScanSpinner::new(quiet));

    let rt = super::runtime()?;
    let dataset = rt
        .block_on(duel_etl_lib::run(
            directories,
            config.num_threads,
            reader,
            progress,
        ))
        .map_err(|e| CliError::scan(e.to_string()))?;

    let path =
        write_ids(&config.output_dir, &dataset).map_err(|e| CliError::scan(e.to_string()))?;

    log::info!(
        "{} Scanned {} cards, {} sleeves, {} playmats, {} characters",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        dataset.card.len(),
        dataset.sleeve.len(),
        dataset.playmat.len(),
        dataset.character.len(),
    );
    log::info!(
        "  Checkpoint: {}",
        path.display().if_supports_color(Stdout, |t| t.cyan())
    );

    Ok(dataset)
}
