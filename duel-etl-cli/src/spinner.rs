//! Spinner display for long-running stages.
//!
//! [`ScanSpinner`] receives progress from scan workers and shows the most
//! recent directory on a single spinner line. Milestones still go through
//! the log so they survive once the spinner is cleared.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use duel_etl_import::ReconcileProgress;
use duel_etl_lib::ScanProgress;

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("  {spinner:.cyan} {msg}")
        .expect("static pattern")
        .tick_chars("/-\\|")
}

/// Create a ticking spinner, hidden when `quiet` is set.
pub(crate) fn new_spinner(quiet: bool, msg: impl Into<String>) -> ProgressBar {
    let pb = if quiet {
        ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(spinner_style());
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Progress sink shared by the scan workers and the reconcile pass.
pub(crate) struct ScanSpinner {
    pb: ProgressBar,
}

impl ScanSpinner {
    pub(crate) fn new(quiet: bool) -> Self {
        Self {
            pb: new_spinner(quiet, "Starting"),
        }
    }

    fn finish(&self, message: &str) {
        self.pb.disable_steady_tick();
        self.pb.finish_and_clear();
        log::info!("{}", message);
    }
}

impl ScanProgress for ScanSpinner {
    fn on_directory(&self, current: usize, total: usize, name: &str) {
        self.pb.set_message(format!("[{current}/{total}] {name}"));
        log::debug!("Scanned {} ({}/{})", name, current, total);
    }

    fn on_phase(&self, message: &str) {
        self.pb.suspend(|| log::info!("{}", message));
        self.pb.set_message(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.finish(message);
    }
}

impl ReconcileProgress for ScanSpinner {
    fn on_card(&self, current: usize, total: usize, name: &str) {
        self.pb.set_message(format!("[{current}/{total}] {name}"));
    }

    fn on_phase(&self, message: &str) {
        self.pb.suspend(|| log::info!("{}", message));
        self.pb.set_message(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.finish(message);
    }
}
