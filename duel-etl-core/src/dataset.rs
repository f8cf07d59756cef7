//! Result sets produced by scanning and reconciliation.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::character::CharacterRecord;
use crate::classify::{ImageCategory, ImageSlot};

/// Bundle reference per filled slot of one texture.
pub type ImageSlots = BTreeMap<ImageSlot, String>;

/// Textures of one image category, keyed by texture name in first-seen order.
pub type ImageCollection = IndexMap<String, ImageSlots>;

/// Image collections plus character records.
///
/// The same shape serves as a per-directory partial and as the merged global
/// dataset, so merging never needs to convert between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub card: ImageCollection,
    #[serde(default)]
    pub sleeve: ImageCollection,
    #[serde(default)]
    pub playmat: ImageCollection,
    #[serde(default)]
    pub character: Vec<CharacterRecord>,
}

/// Output of scanning a single directory.
pub type PartialResultSet = Dataset;

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images_mut(&mut self, category: ImageCategory) -> &mut ImageCollection {
        match category {
            ImageCategory::Card => &mut self.card,
            ImageCategory::Sleeve => &mut self.sleeve,
            ImageCategory::Playmat => &mut self.playmat,
        }
    }

    /// Register a texture and point each given slot at `bundle`.
    ///
    /// The texture entry is created even when `slots` is empty. Existing slot
    /// values are overwritten.
    pub fn record_image(
        &mut self,
        category: ImageCategory,
        texture: &str,
        slots: &[ImageSlot],
        bundle: &str,
    ) {
        let entry = self
            .images_mut(category)
            .entry(texture.to_string())
            .or_default();
        for slot in slots {
            entry.insert(*slot, bundle.to_string());
        }
    }

    pub fn find_character(&self, konami_id: u32) -> Option<&CharacterRecord> {
        self.character.iter().find(|c| c.konami_id == konami_id)
    }

    /// The record for `konami_id`, appended if not yet present.
    pub fn character_mut(&mut self, konami_id: u32) -> &mut CharacterRecord {
        let index = match self.character.iter().position(|c| c.konami_id == konami_id) {
            Some(index) => index,
            None => {
                self.character.push(CharacterRecord::new(konami_id));
                self.character.len() - 1
            }
        };
        &mut self.character[index]
    }

    pub fn is_empty(&self) -> bool {
        self.card.is_empty()
            && self.sleeve.is_empty()
            && self.playmat.is_empty()
            && self.character.is_empty()
    }

    /// Sleeves with both thumbnail sizes, minus the excluded texture names.
    pub fn complete_sleeves(&self, excluded: &[String]) -> ImageCollection {
        self.sleeve
            .iter()
            .filter(|(name, _)| !excluded.iter().any(|e| e == *name))
            .filter(|(_, slots)| has_thumbnails(slots))
            .map(|(name, slots)| (name.clone(), slots.clone()))
            .collect()
    }

    /// Playmats with both thumbnail sizes.
    pub fn complete_playmats(&self) -> ImageCollection {
        self.playmat
            .iter()
            .filter(|(_, slots)| has_thumbnails(slots))
            .map(|(name, slots)| (name.clone(), slots.clone()))
            .collect()
    }
}

fn has_thumbnails(slots: &ImageSlots) -> bool {
    slots.contains_key(&ImageSlot::Small) && slots.contains_key(&ImageSlot::Medium)
}

/// A card renamed to its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledCard {
    pub small: String,
    pub medium: String,
    pub large: String,
    /// Original texture name (the card's numeric identity as text).
    pub id: String,
}

/// Final dataset handed to exporters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledDataset {
    pub card: IndexMap<String, ReconciledCard>,
    pub sleeve: ImageCollection,
    pub playmat: ImageCollection,
    pub character: Vec<CharacterRecord>,
}
