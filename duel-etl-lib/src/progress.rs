//! Scan progress reporting.

/// Trait for receiving scan progress updates.
///
/// Called from worker threads, hence `Send + Sync`.
pub trait ScanProgress: Send + Sync {
    /// Called after a directory has been scanned.
    fn on_directory(&self, current: usize, total: usize, name: &str);

    /// Called when a stage starts (e.g., "Scanning 512 directories").
    fn on_phase(&self, message: &str);

    /// Called when the scan is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ScanProgress for SilentProgress {
    fn on_directory(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ScanProgress for LogProgress {
    fn on_directory(&self, current: usize, total: usize, name: &str) {
        if current.is_multiple_of(64) || current == total {
            log::info!("  [{}/{}] {}", current, total, name);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
