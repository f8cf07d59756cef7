//! Directory scanner for asset-bundle trees.
//!
//! Bundles are grouped in short-named directories under two roots: the
//! installed game data and the streaming-assets tree. Each directory is
//! scanned independently into a [`PartialResultSet`].

use std::path::{Path, PathBuf};

use duel_etl_core::{
    Classification, ContainerEntry, ContainerReader, PartialResultSet, Resolution, classify,
    resolve,
};
use walkdir::WalkDir;

use crate::error::PipelineError;

/// Directory name reserved by the game for non-bundle data.
const RESERVED_DIR: &str = "root";

/// Which asset root a directory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceRoot {
    Game,
    Streaming,
}

impl SourceRoot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Streaming => "streaming",
        }
    }
}

impl std::fmt::Display for SourceRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One bundle directory to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRef {
    pub name: String,
    pub root: PathBuf,
    pub source: SourceRoot,
}

impl DirectoryRef {
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>, source: SourceRoot) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            source,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// `<source>/<name>`, used in progress and log output.
    pub fn label(&self) -> String {
        format!("{}/{}", self.source, self.name)
    }
}

/// List the bundle directories under the game root, then under the
/// streaming root if one is given and exists.
///
/// Names are sorted within each root and the reserved `root` directory is
/// skipped. A missing game root is an error; a missing streaming root is not.
pub fn list_directories(
    game_root: &Path,
    streaming_root: Option<&Path>,
) -> Result<Vec<DirectoryRef>, PipelineError> {
    let mut dirs = list_root(game_root, SourceRoot::Game)?;
    if let Some(streaming) = streaming_root {
        if streaming.is_dir() {
            dirs.extend(list_root(streaming, SourceRoot::Streaming)?);
        } else {
            log::debug!(
                "Streaming root {} not found, scanning game root only",
                streaming.display()
            );
        }
    }
    Ok(dirs)
}

fn list_root(root: &Path, source: SourceRoot) -> Result<Vec<DirectoryRef>, PipelineError> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(root).map_err(|e| PipelineError::malformed(root, e))? {
        let entry = entry.map_err(|e| PipelineError::malformed(root, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        if let Some(name) = file_name.to_str()
            && name != RESERVED_DIR
        {
            names.push(name.to_string());
        }
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| DirectoryRef::new(root, name, source))
        .collect())
}

/// Scan every bundle file below one directory.
///
/// Files are visited in sorted order, so when a texture slot is filled more
/// than once the last bundle in that order wins.
pub fn scan_directory(
    dir: &DirectoryRef,
    reader: &dyn ContainerReader,
) -> Result<PartialResultSet, PipelineError> {
    let path = dir.path();
    let mut partial = PartialResultSet::new();
    log::debug!("Scanning {} ({})", dir.label(), path.display());

    for entry in WalkDir::new(&path).sort_by_file_name() {
        let entry = entry.map_err(|e| PipelineError::malformed(&path, e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let bundle = entry.file_name().to_string_lossy().into_owned();
        for item in reader.read(entry.path())? {
            record_entry(&mut partial, &bundle, &item)?;
        }
    }

    Ok(partial)
}

/// Apply one container entry to a partial result set.
pub fn record_entry(
    partial: &mut PartialResultSet,
    bundle: &str,
    entry: &ContainerEntry,
) -> Result<(), PipelineError> {
    match classify(&entry.key) {
        Classification::Image { category, slots } => {
            partial.record_image(category, &entry.texture_name, &slots, bundle);
        }
        Classification::Character => match resolve(&entry.key)? {
            Resolution::Asset { konami_id, slot } => {
                partial.character_mut(konami_id).set(slot, bundle);
            }
            Resolution::UnknownSlot { konami_id } => {
                log::debug!(
                    "No slot marker for character {} in '{}', skipping",
                    konami_id,
                    entry.key
                );
            }
            Resolution::Noise => {
                log::debug!("Skipping fixture asset '{}'", entry.key);
            }
        },
        Classification::Unrecognized => {
            log::trace!("Ignoring '{}'", entry.key);
        }
    }
    Ok(())
}
