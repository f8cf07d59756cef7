//! Classification of container entry keys into asset families.

use serde::{Deserialize, Serialize};

use crate::character::is_character_asset;

/// Image asset families stored by texture name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageCategory {
    Card,
    Sleeve,
    Playmat,
}

/// Size/role slots an image texture can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    Small,
    Medium,
    Large,
    Mask,
    Name,
}

const CARD_SLOTS: &[ImageSlot] = &[
    ImageSlot::Small,
    ImageSlot::Medium,
    ImageSlot::Large,
    ImageSlot::Mask,
    ImageSlot::Name,
];

const THUMBNAIL_SLOTS: &[ImageSlot] = &[ImageSlot::Small, ImageSlot::Medium];

impl ImageCategory {
    /// Checked in this order; the first category whose root marker is found wins.
    pub const ALL: &'static [ImageCategory] = &[Self::Card, Self::Sleeve, Self::Playmat];

    /// Case-sensitive folder marker identifying this category's keys.
    pub fn root_marker(&self) -> &'static str {
        match self {
            Self::Card => "assets/resources/card/en-us/",
            Self::Sleeve => "assets/resources/sleeve/",
            Self::Playmat => "assets/resources/playmat/",
        }
    }

    /// Slots this category records.
    pub fn slots(&self) -> &'static [ImageSlot] {
        match self {
            Self::Card => CARD_SLOTS,
            Self::Sleeve | Self::Playmat => THUMBNAIL_SLOTS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Sleeve => "sleeve",
            Self::Playmat => "playmat",
        }
    }
}

impl std::fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl ImageSlot {
    /// Path segment selecting this slot.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Small => "/s/",
            Self::Medium => "/m/",
            Self::Large => "/l/",
            Self::Mask => "/mask/",
            Self::Name => "/name/",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Mask => "mask",
            Self::Name => "name",
        }
    }
}

impl std::fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a container entry key refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A card, sleeve or playmat texture. `slots` lists every slot whose
    /// segment occurs in the key and may be empty.
    Image {
        category: ImageCategory,
        slots: Vec<ImageSlot>,
    },
    /// Passed the character-asset gate; hand to the resolver.
    Character,
    Unrecognized,
}

/// Classify an entry key. Never fails.
pub fn classify(path: &str) -> Classification {
    if let Some(category) = ImageCategory::ALL
        .iter()
        .copied()
        .find(|c| path.contains(c.root_marker()))
    {
        let slots = category
            .slots()
            .iter()
            .copied()
            .filter(|slot| path.contains(slot.segment()))
            .collect();
        return Classification::Image { category, slots };
    }

    if is_character_asset(path) {
        return Classification::Character;
    }

    Classification::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_slots() {
        assert_eq!(
            classify("assets/resources/card/en-us/s/4007.png"),
            Classification::Image {
                category: ImageCategory::Card,
                slots: vec![ImageSlot::Small],
            }
        );
        assert_eq!(
            classify("assets/resources/card/en-us/mask/4007.png"),
            Classification::Image {
                category: ImageCategory::Card,
                slots: vec![ImageSlot::Mask],
            }
        );
    }

    #[test]
    fn every_matching_segment_applies() {
        let Classification::Image { slots, .. } =
            classify("assets/resources/card/en-us/l/name/4007.png")
        else {
            panic!("expected image");
        };
        assert_eq!(slots, vec![ImageSlot::Large, ImageSlot::Name]);
    }

    #[test]
    fn sleeves_ignore_large() {
        assert_eq!(
            classify("assets/resources/sleeve/l/1070001.png"),
            Classification::Image {
                category: ImageCategory::Sleeve,
                slots: vec![],
            }
        );
        assert_eq!(
            classify("assets/resources/playmat/m/1090001.png"),
            Classification::Image {
                category: ImageCategory::Playmat,
                slots: vec![ImageSlot::Medium],
            }
        );
    }

    #[test]
    fn folder_markers_are_case_sensitive() {
        assert_eq!(
            classify("Assets/Resources/Card/en-us/s/4007.png"),
            Classification::Unrecognized
        );
    }

    #[test]
    fn character_keys_are_gated() {
        assert_eq!(
            classify("assets/resourcesassetbundle/chara/sn0411/chara001.png"),
            Classification::Character
        );
        assert_eq!(
            classify("assets/resourcesassetbundle/ui/frame001.png"),
            Classification::Unrecognized
        );
    }

    #[test]
    fn other_locales_are_unrecognized() {
        assert_eq!(
            classify("assets/resources/card/ja-jp/s/4007.png"),
            Classification::Unrecognized
        );
    }

    #[test]
    fn slot_serde_names() {
        let json = serde_json::to_string(&ImageSlot::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        assert_eq!(
            serde_json::from_str::<ImageCategory>("\"playmat\"").unwrap(),
            ImageCategory::Playmat
        );
    }
}
