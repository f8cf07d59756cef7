//! JSON checkpoints written between pipeline stages.
//!
//! `ids.json` holds the merged scan result and `data.json` the reconciled
//! dataset. Both are written atomically through a `.tmp` sibling.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use duel_etl_core::{Dataset, ReconciledDataset};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PipelineError;

pub const IDS_FILE: &str = "ids.json";
pub const DATA_FILE: &str = "data.json";
pub const VERSION_FILE: &str = "version.txt";

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string(value)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PipelineError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PipelineError::checkpoint(path, "not found")
        } else {
            PipelineError::Io(e)
        }
    })?;
    serde_json::from_str(&contents).map_err(|e| PipelineError::checkpoint(path, e.to_string()))
}

pub fn write_ids(dir: &Path, data: &Dataset) -> Result<PathBuf, PipelineError> {
    let path = dir.join(IDS_FILE);
    write_json(&path, data)?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}

pub fn read_ids(dir: &Path) -> Result<Dataset, PipelineError> {
    read_json(&dir.join(IDS_FILE))
}

pub fn write_data(dir: &Path, data: &ReconciledDataset) -> Result<PathBuf, PipelineError> {
    let path = dir.join(DATA_FILE);
    write_json(&path, data)?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}

/// Record the extraction date (`YYYY-MM-DD`).
pub fn write_version(dir: &Path, date: NaiveDate) -> Result<PathBuf, PipelineError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(VERSION_FILE);
    std::fs::write(&path, date.format("%Y-%m-%d").to_string())?;
    Ok(path)
}
