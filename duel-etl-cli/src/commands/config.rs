use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use duel_etl_lib::Overrides;
use duel_etl_lib::settings::{
    derive_streaming_path, load_config, load_settings_string, save_game_path, settings_path,
};

use crate::CliError;

fn log_path(label: &str, path: &Path) {
    let status = if path.exists() {
        "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "(not found)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
    };
    log::info!(
        "  {:<16}{} {}",
        label,
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status,
    );
}

/// Show the settings file and the configuration a run would use.
pub(crate) fn run_config_show(overrides: Overrides) -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "duel-etl Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log_path("Settings file:", &path);
    crate::log_blank();

    match load_config(overrides) {
        Ok(config) => {
            log_path("Game path:", &config.game_path);
            log_path("Streaming path:", &config.streaming_path);
            log_path("Manifests:", &config.manifest_dir);
            log_path("Output:", &config.output_dir);
            log_path("Card cache:", &config.database_path);
            log::info!("  {:<16}{}", "Threads:", config.num_threads);
            if !config.excluded_sleeves.is_empty() {
                log::info!(
                    "  {:<16}{}",
                    "Excluded:",
                    config.excluded_sleeves.join(", ")
                );
            }
        }
        Err(e) => {
            log::warn!(
                "  {} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
        }
    }

    if let Some(contents) = load_settings_string(&path) {
        crate::log_blank();
        log::info!("{}", "settings.toml".if_supports_color(Stdout, |t| t.bold()));
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}

/// Save the game data directory to the settings file.
pub(crate) fn run_config_set_game_path(path: PathBuf) -> Result<(), CliError> {
    if !path.is_dir() {
        log::warn!("{} does not exist or is not a directory", path.display());
    }
    let settings = settings_path();
    save_game_path(&settings, &path)
        .map_err(|e| CliError::config(format!("Failed to write {}: {}", settings.display(), e)))?;

    log::info!(
        "{} Saved game path to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        settings.display(),
    );
    match derive_streaming_path(&path) {
        Some(streaming) => log::info!("  Streaming path: {}", streaming.display()),
        None => log::warn!(
            "  Streaming path cannot be derived from {}; set streaming_path in settings.toml",
            path.display()
        ),
    }
    Ok(())
}
