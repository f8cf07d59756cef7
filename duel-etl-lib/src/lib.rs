//! Scanning, partitioning, and merging of game asset directories.

pub mod checkpoint;
pub mod error;
pub mod merge;
pub mod partition;
pub mod pipeline;
pub mod progress;
pub mod scanner;
pub mod settings;
pub mod worker_pool;

pub use error::PipelineError;
pub use merge::{merge_characters, merge_dataset, merge_images};
pub use partition::chunkify;
pub use pipeline::run;
pub use progress::{LogProgress, ScanProgress, SilentProgress};
pub use scanner::{DirectoryRef, SourceRoot, list_directories, scan_directory};
pub use settings::{Config, ConfigError, Overrides, SettingsFile};
pub use worker_pool::WorkerPool;
