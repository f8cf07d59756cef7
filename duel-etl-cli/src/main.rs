//! duel-etl CLI
//!
//! Extracts card, sleeve, playmat and character assets from a Master Duel
//! install and resolves card display names.

mod cli_types;
mod commands;
mod error;
mod spinner;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{CacheAction, Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Emit an empty info line.
pub(crate) fn log_blank() {
    log::info!("");
}

fn init_logging(quiet: bool, verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if std::env::var_os("RUST_LOG").is_none() {
        if quiet {
            builder.filter_level(log::LevelFilter::Warn);
        } else if verbose {
            builder.filter_level(log::LevelFilter::Debug);
        }
    }
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format_timestamp(None).format_level(false).format_target(false);
    }
    builder.target(env_logger::Target::Stdout).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let overrides = cli.overrides();
    let quiet = cli.quiet;

    let result = match cli.command {
        Commands::Run => commands::run::run_all(overrides, quiet),
        Commands::Scan => commands::scan::run_scan(overrides, quiet),
        Commands::Names => commands::names::run_names(overrides, quiet),
        Commands::Cache { action } => match action {
            CacheAction::Stats => commands::cache::run_cache_stats(overrides),
            CacheAction::Clear => commands::cache::run_cache_clear(overrides),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(overrides),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetGamePath { path } => {
                commands::config::run_config_set_game_path(path)
            }
        },
    };

    if let Err(e) = result {
        eprintln!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e
        );
        std::process::exit(1);
    }
}
