//! Name reconciliation for scanned cards.
//!
//! Card textures are keyed by their numeric identity. This pass renames each
//! complete card to its display name and disambiguates repeated names with
//! an ` (alt N)` suffix. Suffixes depend on every name emitted before, so the
//! pass runs sequentially in the scan's insertion order.

use std::collections::HashMap;

use duel_etl_core::{Dataset, ImageCollection, ImageSlot, ReconciledCard, ReconciledDataset};
use duel_etl_db::{OperationError, find_card};
use indexmap::IndexMap;
use rusqlite::Connection;
use thiserror::Error;

use crate::progress::ReconcileProgress;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
}

/// Source of display names by card identity.
pub trait DisplayNames {
    fn display_name(&self, konami_id: u32) -> Result<Option<String>, ReconcileError>;
}

impl DisplayNames for Connection {
    fn display_name(&self, konami_id: u32) -> Result<Option<String>, ReconcileError> {
        Ok(find_card(self, konami_id)?.map(|card| card.name))
    }
}

impl DisplayNames for HashMap<u32, String> {
    fn display_name(&self, konami_id: u32) -> Result<Option<String>, ReconcileError> {
        Ok(self.get(&konami_id).cloned())
    }
}

/// Statistics from a reconciliation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Cards with small, medium and large slots.
    pub considered: usize,
    pub emitted: usize,
    /// Emitted under a suffixed name.
    pub suffixed: usize,
    /// Missing one of the three size slots.
    pub skipped_incomplete: usize,
    /// No display name for the identity (or a non-numeric texture name).
    pub skipped_no_metadata: usize,
}

/// First free name among `base`, `base (alt 1)`, `base (alt 2)`, ...
pub fn unique_name<V>(base: &str, emitted: &IndexMap<String, V>) -> String {
    if !emitted.contains_key(base) {
        return base.to_string();
    }
    let mut n = 1;
    loop {
        let candidate = format!("{base} (alt {n})");
        if !emitted.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Rename complete cards to unique display names, preserving source order.
pub fn reconcile_cards(
    cards: &ImageCollection,
    names: &dyn DisplayNames,
    progress: &dyn ReconcileProgress,
) -> Result<(IndexMap<String, ReconciledCard>, ReconcileStats), ReconcileError> {
    let mut stats = ReconcileStats::default();
    let mut out: IndexMap<String, ReconciledCard> = IndexMap::new();
    let total = cards.len();

    for (i, (texture, slots)) in cards.iter().enumerate() {
        let (Some(small), Some(medium), Some(large)) = (
            slots.get(&ImageSlot::Small),
            slots.get(&ImageSlot::Medium),
            slots.get(&ImageSlot::Large),
        ) else {
            stats.skipped_incomplete += 1;
            continue;
        };
        stats.considered += 1;

        let name = match texture.parse::<u32>() {
            Ok(konami_id) => names.display_name(konami_id)?,
            Err(_) => None,
        };
        let Some(base) = name.filter(|n| !n.is_empty()) else {
            log::debug!("No display name for card {}, skipping", texture);
            stats.skipped_no_metadata += 1;
            continue;
        };

        let name = unique_name(&base, &out);
        if name != base {
            stats.suffixed += 1;
        }
        progress.on_card(i + 1, total, &name);
        out.insert(
            name,
            ReconciledCard {
                small: small.clone(),
                medium: medium.clone(),
                large: large.clone(),
                id: texture.clone(),
            },
        );
        stats.emitted += 1;
    }

    if stats.skipped_no_metadata > 0 {
        log::warn!(
            "{} complete cards had no display name and were left out",
            stats.skipped_no_metadata
        );
    }
    progress.on_complete(&format!(
        "Reconciled {} cards ({} suffixed, {} incomplete, {} without metadata)",
        stats.emitted, stats.suffixed, stats.skipped_incomplete, stats.skipped_no_metadata
    ));

    Ok((out, stats))
}

/// Build the final dataset: reconciled cards plus the scanned sleeves,
/// playmats and characters carried over unchanged.
pub fn reconcile_dataset(
    ids: Dataset,
    names: &dyn DisplayNames,
    progress: &dyn ReconcileProgress,
) -> Result<(ReconciledDataset, ReconcileStats), ReconcileError> {
    progress.on_phase(&format!("Reconciling {} card textures", ids.card.len()));
    let (card, stats) = reconcile_cards(&ids.card, names, progress)?;
    Ok((
        ReconciledDataset {
            card,
            sleeve: ids.sleeve,
            playmat: ids.playmat,
            character: ids.character,
        },
        stats,
    ))
}
