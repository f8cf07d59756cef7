use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Configuration could not be resolved
    #[error("Config error: {0}")]
    Config(String),

    /// Scan or checkpoint failure
    #[error("Scan error: {0}")]
    Scan(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Card metadata could not be fetched
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn scan(msg: impl Into<String>) -> Self {
        Self::Scan(msg.into())
    }

    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
