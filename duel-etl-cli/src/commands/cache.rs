use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use duel_etl_lib::Overrides;
use duel_etl_lib::settings::{default_database_path, load_settings_file, settings_path};

use crate::CliError;

/// Cache location from the flag or the settings file. Does not require a
/// game path.
fn database_path(overrides: Overrides) -> Result<std::path::PathBuf, CliError> {
    if let Some(path) = overrides.database_path {
        return Ok(path);
    }
    let file = load_settings_file(&settings_path())
        .map_err(|e| CliError::config(format!("Failed to read settings: {}", e)))?;
    Ok(file.database_path.unwrap_or_else(default_database_path))
}

/// Show cached card counts and the most recent fetch.
pub(crate) fn run_cache_stats(overrides: Overrides) -> Result<(), CliError> {
    let db_path = database_path(overrides)?;
    if !db_path.exists() {
        log::info!(
            "{}",
            "No card cache yet.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!("Run 'duel-etl run' or 'duel-etl names' to fetch card metadata.");
        return Ok(());
    }

    let conn = duel_etl_db::open_database(&db_path)
        .map_err(|e| CliError::database(format!("Failed to open card cache: {}", e)))?;
    let stats = duel_etl_db::cache_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query card cache: {}", e)))?;

    log::info!(
        "{}",
        "Card Metadata Cache".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Cards:          {:>8}", stats.cards);
    for (frame_type, count) in &stats.frame_types {
        log::info!(
            "    {:<14}{:>8}",
            frame_type.if_supports_color(Stdout, |t| t.cyan()),
            count
        );
    }
    crate::log_blank();
    match &stats.last_fetch {
        Some(fetch) => log::info!(
            "  Last fetch: {} cards from {} at {}",
            fetch.card_count,
            fetch.source,
            fetch.fetched_at,
        ),
        None => log::info!(
            "  Last fetch: {}",
            "never".if_supports_color(Stdout, |t| t.dimmed())
        ),
    }

    Ok(())
}

/// Delete every cached card so the next run refetches from the provider.
pub(crate) fn run_cache_clear(overrides: Overrides) -> Result<(), CliError> {
    let db_path = database_path(overrides)?;
    if !db_path.exists() {
        log::info!("Card cache is already empty.");
        return Ok(());
    }

    let conn = duel_etl_db::open_database(&db_path)
        .map_err(|e| CliError::database(format!("Failed to open card cache: {}", e)))?;
    let removed = duel_etl_db::clear_cards(&conn)
        .map_err(|e| CliError::database(format!("Failed to clear card cache: {}", e)))?;

    log::info!(
        "{} Removed {} cached cards",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        removed,
    );
    Ok(())
}
