//! Metadata fetch and name reconciliation stages.

pub mod fetch;
pub mod progress;
pub mod reconcile;

pub use fetch::{FetchError, FetchOutcome, ensure_card_metadata};
pub use progress::{LogProgress, ReconcileProgress, SilentProgress};
pub use reconcile::{
    DisplayNames, ReconcileError, ReconcileStats, reconcile_cards, reconcile_dataset, unique_name,
};
