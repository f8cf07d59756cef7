//! Capability interface for reading packaged asset containers.
//!
//! Decoding the binary container format is left to an external tool. The
//! pipeline only needs each entry's key and the texture name it carries.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// One named entry inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEntry {
    /// Internal path of the entry, e.g. `assets/resources/card/en-us/s/4007.png`.
    pub key: String,
    /// Name of the texture object stored under the key.
    pub texture_name: String,
}

impl ContainerEntry {
    pub fn new(key: impl Into<String>, texture_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            texture_name: texture_name.into(),
        }
    }
}

/// Reads the entries of one bundle file.
///
/// Implementations are shared across scanning workers.
pub trait ContainerReader: Send + Sync {
    fn read(&self, bundle: &Path) -> Result<Vec<ContainerEntry>, AssetError>;
}

#[derive(Debug, Deserialize)]
struct Manifest {
    entries: Vec<ContainerEntry>,
}

/// Reads pre-dumped JSON listings, one `<bundle name>.json` per bundle,
/// from a manifest directory.
///
/// Each listing has the shape `{"entries": [{"key": ..., "texture_name": ...}]}`.
#[derive(Debug, Clone)]
pub struct ManifestReader {
    dir: PathBuf,
}

impl ManifestReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Location of the listing for a bundle.
    pub fn manifest_path(&self, bundle: &Path) -> Result<PathBuf, AssetError> {
        let name = bundle
            .file_name()
            .ok_or_else(|| AssetError::container(bundle, "bundle path has no file name"))?;
        let mut file = name.to_os_string();
        file.push(".json");
        Ok(self.dir.join(file))
    }
}

impl ContainerReader for ManifestReader {
    fn read(&self, bundle: &Path) -> Result<Vec<ContainerEntry>, AssetError> {
        let path = self.manifest_path(bundle)?;
        let content = fs::read_to_string(&path)
            .map_err(|e| AssetError::container(bundle, format!("{}: {e}", path.display())))?;
        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|e| AssetError::container(bundle, format!("{}: {e}", path.display())))?;
        Ok(manifest.entries)
    }
}

/// In-memory reader keyed by bundle file name.
///
/// Bundles that were never registered read as empty.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    bundles: HashMap<String, Vec<ContainerEntry>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bundle: impl Into<String>, entries: Vec<ContainerEntry>) {
        self.bundles.insert(bundle.into(), entries);
    }

    pub fn with_bundle(mut self, bundle: impl Into<String>, entries: Vec<ContainerEntry>) -> Self {
        self.insert(bundle, entries);
        self
    }
}

impl ContainerReader for MemoryReader {
    fn read(&self, bundle: &Path) -> Result<Vec<ContainerEntry>, AssetError> {
        let name = bundle
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.bundles.get(&name).cloned().unwrap_or_default())
    }
}
