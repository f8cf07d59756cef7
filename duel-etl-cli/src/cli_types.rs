//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use duel_etl_lib::Overrides;

#[derive(Parser)]
#[command(name = "duel-etl")]
#[command(
    about = "Extract card, sleeve, playmat and character assets from Master Duel",
    long_about = None
)]
pub(crate) struct Cli {
    /// Game data directory (`.../LocalData/<account>/0000`)
    #[arg(long, global = true)]
    pub game_path: Option<PathBuf>,

    /// Streaming asset directory (derived from the game path if omitted)
    #[arg(long, global = true)]
    pub streaming_path: Option<PathBuf>,

    /// Number of scan workers
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,

    /// Output directory for ids.json, data.json and version.txt
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Card metadata cache database
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory holding the dumped bundle manifests
    #[arg(long, global = true)]
    pub manifests: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Path flags as configuration overrides.
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            game_path: self.game_path.clone(),
            streaming_path: self.streaming_path.clone(),
            num_threads: self.threads,
            output_dir: self.output.clone(),
            database_path: self.db.clone(),
            manifest_dir: self.manifests.clone(),
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan, fetch card names, and write the final dataset
    Run,

    /// Scan bundle directories and write ids.json
    Scan,

    /// Resolve card names for an existing ids.json and write data.json
    Names,

    /// Manage the card metadata cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Show or edit saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Show cached card counts and the last fetch
    Stats,

    /// Delete all cached cards so the next run refetches them
    Clear,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the resolved configuration
    Show,

    /// Print the settings file path
    Path,

    /// Save the game data directory to the settings file
    SetGamePath {
        /// Path to `.../LocalData/<account>/0000`
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_become_overrides() {
        let cli = Cli::parse_from([
            "duel-etl",
            "scan",
            "--game-path",
            "/g/LocalData/abc/0000",
            "-j",
            "4",
            "--output",
            "out",
        ]);
        let overrides = cli.overrides();
        assert_eq!(
            overrides.game_path,
            Some(PathBuf::from("/g/LocalData/abc/0000"))
        );
        assert_eq!(overrides.num_threads, Some(4));
        assert_eq!(overrides.output_dir, Some(PathBuf::from("out")));
        assert!(overrides.streaming_path.is_none());
        assert!(matches!(cli.command, Commands::Scan));
    }

    #[test]
    fn nested_subcommands_parse() {
        let cli = Cli::parse_from(["duel-etl", "config", "set-game-path", "/x/0000"]);
        match cli.command {
            Commands::Config {
                action: ConfigAction::SetGamePath { path },
            } => assert_eq!(path, PathBuf::from("/x/0000")),
            _ => panic!("expected config set-game-path"),
        }
    }
}
