//! Application settings (`~/.config/duel-etl/settings.toml`) and the
//! resolution of the effective run configuration.
//!
//! Every field resolves through the same priority chain:
//!
//! 1. CLI override
//! 2. Environment variable (where one exists)
//! 3. Saved value in `settings.toml`
//! 4. Built-in default

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_GAME_PATH: &str = "DUEL_ETL_GAME_PATH";
pub const ENV_STREAMING_PATH: &str = "DUEL_ETL_STREAMING_PATH";
pub const ENV_THREADS: &str = "DUEL_ETL_THREADS";

/// Path of the streaming-assets tree relative to the install directory.
const STREAMING_SUFFIX: [&str; 3] = ["masterduel_Data", "StreamingAssets", "AssetBundle"];

/// Components between the install directory and the game path
/// (`LocalData/<account>/<slot>`).
const GAME_PATH_DEPTH: usize = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No game path configured (use --game-path, DUEL_ETL_GAME_PATH, or `duel-etl config set-game-path`)")]
    MissingGamePath,

    #[error("Cannot derive the streaming path from '{}': expected <install>/LocalData/<account>/<slot>", path.display())]
    UnderivableStreamingPath { path: PathBuf },

    #[error("Invalid thread count '{value}': must be a positive integer")]
    InvalidThreads { value: String },

    #[error("Settings error: {0}")]
    Io(#[from] io::Error),
}

/// Contents of `settings.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub game_path: Option<PathBuf>,
    pub streaming_path: Option<PathBuf>,
    pub num_threads: Option<usize>,
    pub excluded_sleeves: Vec<String>,
    pub output_dir: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub manifest_dir: Option<PathBuf>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub game_path: Option<PathBuf>,
    pub streaming_path: Option<PathBuf>,
    pub num_threads: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub manifest_dir: Option<PathBuf>,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub game_path: PathBuf,
    pub streaming_path: PathBuf,
    pub num_threads: usize,
    pub excluded_sleeves: Vec<String>,
    pub output_dir: PathBuf,
    pub database_path: PathBuf,
    pub manifest_dir: PathBuf,
}

/// Canonical path to the settings file: `~/.config/duel-etl/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("duel-etl").join("settings.toml")
}

/// Default metadata cache location: `~/.cache/duel-etl/cards.db`.
pub fn default_database_path() -> PathBuf {
    let cache = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
    cache.join("duel-etl").join("cards.db")
}

pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Derive the streaming-assets root from a game path of the form
/// `<install>/LocalData/<account>/<slot>`.
pub fn derive_streaming_path(game_path: &Path) -> Option<PathBuf> {
    let install = game_path.ancestors().nth(GAME_PATH_DEPTH)?;
    if install.as_os_str().is_empty() {
        return None;
    }
    Some(STREAMING_SUFFIX.iter().fold(install.to_path_buf(), |p, c| p.join(c)))
}

/// Load `settings.toml` from `path`. A missing file yields empty settings.
pub fn load_settings_file(path: &Path) -> io::Result<SettingsFile> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).map_err(io::Error::other),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SettingsFile::default()),
        Err(e) => Err(e),
    }
}

/// Load the settings file as a pretty-printed TOML string for display.
pub fn load_settings_string(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

/// Save the game path in `settings.toml`, preserving all other keys.
pub fn save_game_path(settings: &Path, game_path: &Path) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    table.insert(
        "game_path".to_string(),
        toml::Value::String(game_path.to_string_lossy().into_owned()),
    );

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Resolve the run configuration from CLI overrides, an environment lookup,
/// and the saved settings.
pub fn resolve_config(
    overrides: Overrides,
    file: &SettingsFile,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let env_path = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);

    let game_path = overrides
        .game_path
        .or_else(|| env_path(ENV_GAME_PATH))
        .or_else(|| file.game_path.clone())
        .ok_or(ConfigError::MissingGamePath)?;

    let streaming_path = match overrides
        .streaming_path
        .or_else(|| env_path(ENV_STREAMING_PATH))
        .or_else(|| file.streaming_path.clone())
    {
        Some(p) => p,
        None => derive_streaming_path(&game_path).ok_or_else(|| {
            ConfigError::UnderivableStreamingPath {
                path: game_path.clone(),
            }
        })?,
    };

    let num_threads = match overrides.num_threads {
        Some(n) => n,
        None => match env(ENV_THREADS).filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidThreads { value: raw.clone() })?,
            None => file.num_threads.unwrap_or_else(default_threads),
        },
    };
    if num_threads == 0 {
        return Err(ConfigError::InvalidThreads {
            value: num_threads.to_string(),
        });
    }

    let output_dir = overrides
        .output_dir
        .or_else(|| file.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("output"));
    let database_path = overrides
        .database_path
        .or_else(|| file.database_path.clone())
        .unwrap_or_else(default_database_path);
    let manifest_dir = overrides
        .manifest_dir
        .or_else(|| file.manifest_dir.clone())
        .unwrap_or_else(|| output_dir.join("manifests"));

    Ok(Config {
        game_path,
        streaming_path,
        num_threads,
        excluded_sleeves: file.excluded_sleeves.clone(),
        output_dir,
        database_path,
        manifest_dir,
    })
}

/// [`resolve_config`] against the real environment and settings file.
pub fn load_config(overrides: Overrides) -> Result<Config, ConfigError> {
    let file = load_settings_file(&settings_path())?;
    resolve_config(overrides, &file, |key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn game() -> PathBuf {
        PathBuf::from("/games/Master Duel/LocalData/1a2b3c4d/0000")
    }

    #[test]
    fn streaming_path_is_derived_from_install_dir() {
        assert_eq!(
            derive_streaming_path(&game()),
            Some(PathBuf::from(
                "/games/Master Duel/masterduel_Data/StreamingAssets/AssetBundle"
            ))
        );
        assert_eq!(derive_streaming_path(Path::new("a/b")), None);
    }

    #[test]
    fn missing_game_path() {
        let err = resolve_config(Overrides::default(), &SettingsFile::default(), no_env)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingGamePath));
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = SettingsFile {
            game_path: Some(PathBuf::from("/file/a/b/c")),
            num_threads: Some(2),
            ..Default::default()
        };
        let env: HashMap<&str, &str> =
            [(ENV_GAME_PATH, "/env/a/b/c"), (ENV_THREADS, "6")].into();
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());

        let config = resolve_config(Overrides::default(), &file, lookup).unwrap();
        assert_eq!(config.game_path, PathBuf::from("/env/a/b/c"));
        assert_eq!(config.num_threads, 6);

        let overrides = Overrides {
            game_path: Some(PathBuf::from("/cli/a/b/c")),
            num_threads: Some(3),
            ..Default::default()
        };
        let config = resolve_config(overrides, &file, lookup).unwrap();
        assert_eq!(config.game_path, PathBuf::from("/cli/a/b/c"));
        assert_eq!(config.num_threads, 3);
    }

    #[test]
    fn file_values_and_defaults() {
        let file = SettingsFile {
            game_path: Some(game()),
            excluded_sleeves: vec!["1070999".to_string()],
            output_dir: Some(PathBuf::from("/out")),
            ..Default::default()
        };
        let config = resolve_config(Overrides::default(), &file, no_env).unwrap();
        assert_eq!(config.excluded_sleeves, vec!["1070999".to_string()]);
        assert_eq!(config.output_dir, PathBuf::from("/out"));
        assert_eq!(config.manifest_dir, PathBuf::from("/out/manifests"));
        assert!(config.num_threads >= 1);
        assert!(config.streaming_path.ends_with("StreamingAssets/AssetBundle"));
    }

    #[test]
    fn invalid_thread_counts() {
        let file = SettingsFile {
            game_path: Some(game()),
            ..Default::default()
        };
        let err = resolve_config(Overrides::default(), &file, |k| {
            (k == ENV_THREADS).then(|| "many".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreads { .. }));

        let overrides = Overrides {
            num_threads: Some(0),
            ..Default::default()
        };
        assert!(resolve_config(overrides, &file, no_env).is_err());
    }

    #[test]
    fn settings_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        assert_eq!(load_settings_file(&path).unwrap(), SettingsFile::default());

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "num_threads = 4\nexcluded_sleeves = [\"1\"]\n").unwrap();
        save_game_path(&path, &game()).unwrap();

        let file = load_settings_file(&path).unwrap();
        assert_eq!(file.game_path, Some(game()));
        assert_eq!(file.num_threads, Some(4));
        assert_eq!(file.excluded_sleeves, vec!["1".to_string()]);
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
