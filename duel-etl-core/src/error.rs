use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while interpreting asset containers.
#[derive(Debug, Error)]
pub enum AssetError {
    /// A key passed the character gate but carries no character identity.
    #[error("Classification miss: no character identity in '{path}'")]
    ClassificationMiss { path: String },

    /// A container could not be opened or parsed.
    #[error("Failed to read container {}: {message}", path.display())]
    Container { path: PathBuf, message: String },
}

impl AssetError {
    pub fn classification_miss(path: impl Into<String>) -> Self {
        Self::ClassificationMiss { path: path.into() }
    }

    pub fn container(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Container {
            path: path.into(),
            message: message.into(),
        }
    }
}
