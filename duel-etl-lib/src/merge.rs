//! Merge rules for combining partial result sets.
//!
//! Image collections and character records resolve conflicts with opposite
//! polarity: for images the incoming value replaces the accumulated one, for
//! characters the accumulated value is kept and only empty slots are filled.

use duel_etl_core::{CharacterRecord, Dataset, ImageCategory, ImageCollection};

/// Merge `incoming` into `acc`.
pub fn merge_dataset(acc: &mut Dataset, incoming: Dataset) {
    let Dataset {
        card,
        sleeve,
        playmat,
        character,
    } = incoming;

    merge_images(acc.images_mut(ImageCategory::Card), card);
    merge_images(acc.images_mut(ImageCategory::Sleeve), sleeve);
    merge_images(acc.images_mut(ImageCategory::Playmat), playmat);
    merge_characters(&mut acc.character, character);
}

/// Structural merge where incoming slot values overwrite existing ones.
///
/// Textures keep the position of their first insertion; new textures are
/// appended.
pub fn merge_images(acc: &mut ImageCollection, incoming: ImageCollection) {
    for (texture, slots) in incoming {
        match acc.get_mut(&texture) {
            Some(existing) => existing.extend(slots),
            None => {
                acc.insert(texture, slots);
            }
        }
    }
}

/// Merge character records by identity.
///
/// Unknown identities are appended whole. For known identities only slots
/// still unset in `acc` are taken from the incoming record; series is never
/// changed.
pub fn merge_characters(acc: &mut Vec<CharacterRecord>, incoming: Vec<CharacterRecord>) {
    for record in incoming {
        match acc.iter_mut().find(|c| c.konami_id == record.konami_id) {
            Some(existing) => {
                existing.fill_missing_from(&record);
            }
            None => acc.push(record),
        }
    }
}
