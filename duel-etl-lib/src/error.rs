use std::path::PathBuf;

use duel_etl_core::AssetError;
use thiserror::Error;

/// Errors that abort a scan run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A listed directory could not be walked.
    #[error("Malformed directory {}: {source}", path.display())]
    MalformedDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Classification or container failure inside a directory.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// A worker exited without delivering its chunk's result.
    #[error("Worker for chunk {chunk} exited without a result")]
    WorkerLost { chunk: usize },

    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error("Checkpoint error at {}: {message}", path.display())]
    Checkpoint { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn malformed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MalformedDirectory {
            path: path.into(),
            source,
        }
    }

    pub fn checkpoint(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Checkpoint {
            path: path.into(),
            message: message.into(),
        }
    }
}
