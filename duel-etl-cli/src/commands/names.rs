use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use duel_etl_core::Dataset;
use duel_etl_import::{FetchOutcome, ensure_card_metadata, reconcile_dataset};
use duel_etl_lib::checkpoint::{IDS_FILE, read_ids, write_data, write_version};
use duel_etl_lib::{Config, Overrides};
use duel_etl_provider::YgoProClient;

use crate::CliError;
use crate::spinner::{ScanSpinner, new_spinner};

/// Resolve card names for the dataset in `ids.json` and write `data.json`.
pub(crate) fn run_names(overrides: Overrides, quiet: bool) -> Result<(), CliError> {
    let config = super::resolve(overrides)?;
    require_scan_checkpoint(&config.output_dir)?;

    let dataset = read_ids(&config.output_dir).map_err(|e| CliError::scan(e.to_string()))?;
    names(&config, dataset, quiet)
}

/// Fail unless a previous scan left `ids.json` in `output_dir`.
fn require_scan_checkpoint(output_dir: &Path) -> Result<(), CliError> {
    let ids_path = output_dir.join(IDS_FILE);
    if ids_path.exists() {
        return Ok(());
    }
    Err(CliError::scan(format!(
        "No scan checkpoint found at {}\nRun 'duel-etl scan' first.",
        ids_path.display()
    )))
}

/// Fetch-or-reuse card metadata, reconcile names, and write the final
/// dataset with its version stamp.
pub(crate) fn names(config: &Config, dataset: Dataset, quiet: bool) -> Result<(), CliError> {
    let conn = duel_etl_db::open_database(&config.database_path)
        .map_err(|e| CliError::database(format!("Failed to open card cache: {}", e)))?;

    let client = YgoProClient::new().map_err(|e| CliError::fetch(e.to_string()))?;
    let rt = super::runtime()?;
    let pb = new_spinner(quiet, "Checking card metadata cache");
    let outcome = rt.block_on(ensure_card_metadata(&conn, &client));
    pb.finish_and_clear();
    if let FetchOutcome::Fetched(n) = outcome.map_err(|e| CliError::fetch(e.to_string()))? {
        log::info!(
            "{} Fetched {} cards",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            n
        );
    }

    let sleeves = dataset.complete_sleeves(&config.excluded_sleeves).len();
    let playmats = dataset.complete_playmats().len();

    let progress = ScanSpinner::new(quiet);
    let (reconciled, stats) = reconcile_dataset(dataset, &conn, &progress)
        .map_err(|e| CliError::database(e.to_string()))?;

    let path = write_data(&config.output_dir, &reconciled)
        .map_err(|e| CliError::scan(e.to_string()))?;
    let today = chrono::Local::now().date_naive();
    write_version(&config.output_dir, today).map_err(|e| CliError::scan(e.to_string()))?;

    log::info!(
        "{} Wrote {} cards ({} renamed with a suffix)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.emitted,
        stats.suffixed,
    );
    if stats.skipped_incomplete > 0 || stats.skipped_no_metadata > 0 {
        log::info!(
            "  {}",
            format!(
                "Skipped {} incomplete, {} without metadata",
                stats.skipped_incomplete, stats.skipped_no_metadata
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!(
        "  Exportable: {} sleeves, {} playmats, {} characters",
        sleeves,
        playmats,
        reconciled.character.len(),
    );
    log::info!(
        "  Output: {} (version {})",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        today.format("%Y-%m-%d"),
    );

    Ok(())
}
