//! Character identity resolution for character-asset container keys.
//!
//! Character keys encode the owning character as `sn` + four digits and the
//! role of the texture as a short marker (`chara001`, `cutin002`, ...).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AssetError;
use crate::series::{Series, classify_series};

macro_rules! chara_slots {
    ($($variant:ident => $marker:literal, $field:literal;)*) => {
        /// A named asset slot a character texture can fill.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum CharaSlot {
            $($variant,)*
        }

        const DECLARED: &[CharaSlot] = &[$(CharaSlot::$variant,)*];

        impl CharaSlot {
            /// Lower-case marker substring identifying this slot in a key.
            pub fn marker(&self) -> &'static str {
                match self {
                    $(Self::$variant => $marker,)*
                }
            }

            /// Column name used in checkpoints and exports.
            pub fn field_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $field,)*
                }
            }
        }
    };
}

chara_slots! {
    Icon => "chara001", "icon";
    Select => "chara002", "select";
    Duel1 => "chara003_1", "duel_1";
    Duel2 => "chara003_2", "duel_2";
    Duel3 => "chara003_3", "duel_3";
    Duel4 => "chara003_4", "duel_4";
    Duel5 => "chara003_5", "duel_5";
    Duel6 => "chara003_6", "duel_6";
    Duel7 => "chara003_7", "duel_7";
    Duel8 => "chara003_8", "duel_8";
    Duel9 => "chara003_9", "duel_9";
    Duel10 => "chara003_10", "duel_10";
    Duel11 => "chara003_11", "duel_11";
    Duel12 => "chara003_12", "duel_12";
    Duel13 => "chara003_13", "duel_13";
    Duel14 => "chara003_14", "duel_14";
    Duel15 => "chara003_15", "duel_15";
    Duel16 => "chara003_16", "duel_16";
    Duel17 => "chara003_17", "duel_17";
    Duel18 => "chara003_18", "duel_18";
    Duel19 => "chara003_19", "duel_19";
    Duel20 => "chara003_20", "duel_20";
    Duel31 => "chara003_31", "duel_31";
    Duel32 => "chara003_32", "duel_32";
    Duel33 => "chara003_33", "duel_33";
    Duel34 => "chara003_34", "duel_34";
    Duel35 => "chara003_35", "duel_35";
    Duel36 => "chara003_36", "duel_36";
    Duel37 => "chara003_37", "duel_37";
    Duel38 => "chara003_38", "duel_38";
    Duel39 => "chara003_39", "duel_39";
    Duel40 => "chara003_40", "duel_40";
    Duel41 => "chara003_41", "duel_41";
    Duel42 => "chara003_42", "duel_42";
    World => "chara004", "world";
    Event => "chara004_1", "event";
    Dialog0 => "chara007_0", "dialog_0";
    Dialog1 => "chara007_1", "dialog_1";
    Dialog2 => "chara007_2", "dialog_2";
    Dialog3 => "chara007_3", "dialog_3";
    Dialog4 => "chara007_4", "dialog_4";
    Dialog5 => "chara007_5", "dialog_5";
    Dialog6 => "chara007_6", "dialog_6";
    Dialog7 => "chara007_7", "dialog_7";
    Dialog8 => "chara007_8", "dialog_8";
    Dialog9 => "chara007_9", "dialog_9";
    Dialog10 => "chara007_10", "dialog_10";
    Dialog11 => "chara007_11", "dialog_11";
    Dialog12 => "chara007_12", "dialog_12";
    Dialog13 => "chara007_13", "dialog_13";
    Dialog14 => "chara007_14", "dialog_14";
    Dialog15 => "chara007_15", "dialog_15";
    Dialog16 => "chara007_16", "dialog_16";
    Dialog17 => "chara007_17", "dialog_17";
    Dialog18 => "chara007_18", "dialog_18";
    Dialog19 => "chara007_19", "dialog_19";
    Dialog20 => "chara007_20", "dialog_20";
    Dialog21 => "chara007_21", "dialog_21";
    Dialog22 => "chara007_22", "dialog_22";
    Dialog23 => "chara007_23", "dialog_23";
    Dialog24 => "chara007_24", "dialog_24";
    Dialog25 => "chara007_25", "dialog_25";
    Dialog26 => "chara007_26", "dialog_26";
    Dialog31 => "chara007_31", "dialog_31";
    Dialog32 => "chara007_32", "dialog_32";
    Dialog33 => "chara007_33", "dialog_33";
    Dialog34 => "chara007_34", "dialog_34";
    Dialog35 => "chara007_35", "dialog_35";
    Dialog36 => "chara007_36", "dialog_36";
    Dialog37 => "chara007_37", "dialog_37";
    Dialog38 => "chara007_38", "dialog_38";
    Dialog39 => "chara007_39", "dialog_39";
    Dialog40 => "chara007_40", "dialog_40";
    Dialog41 => "chara007_41", "dialog_41";
    Dialog42 => "chara007_42", "dialog_42";
    Dialog43 => "chara007_43", "dialog_43";
    Dialog44 => "chara007_44", "dialog_44";
    Dialog45 => "chara007_45", "dialog_45";
    SelectedLegacy => "chara009", "selected_legacy";
    SelectedNew => "chara010", "selected_new";
    HomeVictory => "chara050_1", "home_victory";
    HomeSpecial => "chara050_2", "home_special";
    NameBig => "charaname001", "name_big";
    NameSmall => "charaname002", "name_small";
    Cutin => "cutin001", "cutin";
    Victory => "cutin002", "victory";
    Defeat => "cutin003", "defeat";
    Versus => "vs001", "versus";
}

/// Slot match order. The first entry whose marker occurs in the key wins, so
/// every marker must come before any shorter marker it extends
/// (`chara003_10` before `chara003_1`, `chara004_1` before `chara004`).
const MATCH_ORDER: &[CharaSlot] = &[
    CharaSlot::Icon,
    CharaSlot::Select,
    CharaSlot::Duel10,
    CharaSlot::Duel11,
    CharaSlot::Duel12,
    CharaSlot::Duel13,
    CharaSlot::Duel14,
    CharaSlot::Duel15,
    CharaSlot::Duel16,
    CharaSlot::Duel17,
    CharaSlot::Duel18,
    CharaSlot::Duel19,
    CharaSlot::Duel1,
    CharaSlot::Duel20,
    CharaSlot::Duel2,
    CharaSlot::Duel31,
    CharaSlot::Duel32,
    CharaSlot::Duel33,
    CharaSlot::Duel34,
    CharaSlot::Duel35,
    CharaSlot::Duel36,
    CharaSlot::Duel37,
    CharaSlot::Duel38,
    CharaSlot::Duel39,
    CharaSlot::Duel3,
    CharaSlot::Duel40,
    CharaSlot::Duel41,
    CharaSlot::Duel42,
    CharaSlot::Duel4,
    CharaSlot::Duel5,
    CharaSlot::Duel6,
    CharaSlot::Duel7,
    CharaSlot::Duel8,
    CharaSlot::Duel9,
    CharaSlot::Event,
    CharaSlot::World,
    CharaSlot::Dialog0,
    CharaSlot::Dialog10,
    CharaSlot::Dialog11,
    CharaSlot::Dialog12,
    CharaSlot::Dialog13,
    CharaSlot::Dialog14,
    CharaSlot::Dialog15,
    CharaSlot::Dialog16,
    CharaSlot::Dialog17,
    CharaSlot::Dialog18,
    CharaSlot::Dialog19,
    CharaSlot::Dialog1,
    CharaSlot::Dialog20,
    CharaSlot::Dialog21,
    CharaSlot::Dialog22,
    CharaSlot::Dialog23,
    CharaSlot::Dialog24,
    CharaSlot::Dialog25,
    CharaSlot::Dialog26,
    CharaSlot::Dialog2,
    CharaSlot::Dialog31,
    CharaSlot::Dialog32,
    CharaSlot::Dialog33,
    CharaSlot::Dialog34,
    CharaSlot::Dialog35,
    CharaSlot::Dialog36,
    CharaSlot::Dialog37,
    CharaSlot::Dialog38,
    CharaSlot::Dialog39,
    CharaSlot::Dialog3,
    CharaSlot::Dialog40,
    CharaSlot::Dialog41,
    CharaSlot::Dialog42,
    CharaSlot::Dialog43,
    CharaSlot::Dialog44,
    CharaSlot::Dialog45,
    CharaSlot::Dialog4,
    CharaSlot::Dialog5,
    CharaSlot::Dialog6,
    CharaSlot::Dialog7,
    CharaSlot::Dialog8,
    CharaSlot::Dialog9,
    CharaSlot::SelectedLegacy,
    CharaSlot::SelectedNew,
    CharaSlot::HomeVictory,
    CharaSlot::HomeSpecial,
    CharaSlot::NameBig,
    CharaSlot::NameSmall,
    CharaSlot::Cutin,
    CharaSlot::Victory,
    CharaSlot::Defeat,
    CharaSlot::Versus,
];

impl CharaSlot {
    /// Look up a slot by its column name.
    pub fn from_field_name(name: &str) -> Option<Self> {
        DECLARED.iter().copied().find(|slot| slot.field_name() == name)
    }
}

impl std::fmt::Display for CharaSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

impl Serialize for CharaSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.field_name())
    }
}

impl<'de> Deserialize<'de> for CharaSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        CharaSlot::from_field_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown character slot '{name}'")))
    }
}

/// Assets collected for one character.
///
/// Series is fixed when the record is created and never reassigned. Each slot
/// holds at most one bundle reference; absent slots are unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub konami_id: u32,
    pub series: Series,
    #[serde(flatten)]
    pub assets: BTreeMap<CharaSlot, String>,
}

impl CharacterRecord {
    /// Create an empty record, classifying its series from the identity.
    pub fn new(konami_id: u32) -> Self {
        Self {
            konami_id,
            series: classify_series(konami_id),
            assets: BTreeMap::new(),
        }
    }

    pub fn with_asset(mut self, slot: CharaSlot, bundle: impl Into<String>) -> Self {
        self.set(slot, bundle);
        self
    }

    /// Set a slot, replacing any previous value.
    pub fn set(&mut self, slot: CharaSlot, bundle: impl Into<String>) {
        self.assets.insert(slot, bundle.into());
    }

    pub fn get(&self, slot: CharaSlot) -> Option<&str> {
        self.assets.get(&slot).map(String::as_str)
    }

    /// Copy every slot from `other` that is still unset here.
    ///
    /// Returns the number of slots filled. Series is left untouched.
    pub fn fill_missing_from(&mut self, other: &CharacterRecord) -> usize {
        let mut filled = 0;
        for (slot, bundle) in &other.assets {
            if !self.assets.contains_key(slot) {
                self.assets.insert(*slot, bundle.clone());
                filled += 1;
            }
        }
        filled
    }
}

static CHARACTER_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(chara|charaname|cutin|vs)\d{3}(_\d+)?\.png").expect("static pattern")
});

static IDENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sn(\d{4})").expect("static pattern"));

/// Markers of test and placeholder fixtures shipped alongside real assets.
const NOISE_MARKERS: &[&str] = &["test", "temp", "dummy", "placeholder"];

/// Whether a key looks like a character texture (`chara001.png`,
/// `charaname002.png`, `cutin003.png`, `vs001.png`, numbered variants).
pub fn is_character_asset(path: &str) -> bool {
    CHARACTER_FILE.is_match(&path.to_lowercase())
}

/// Match a key against the slot table; first marker contained in the key wins.
pub fn resolve_slot(path: &str) -> Option<CharaSlot> {
    let lower = path.to_lowercase();
    MATCH_ORDER
        .iter()
        .copied()
        .find(|slot| lower.contains(slot.marker()))
}

/// Extract the numeric character identity (`sn0411` → 411).
pub fn extract_identity(path: &str) -> Option<u32> {
    let lower = path.to_lowercase();
    IDENTITY
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Whether a key belongs to a known test/placeholder fixture.
pub fn is_noise(path: &str) -> bool {
    let lower = path.to_lowercase();
    NOISE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Outcome of resolving a key that passed [`is_character_asset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Identity and slot both resolved.
    Asset { konami_id: u32, slot: CharaSlot },
    /// Identity resolved but no slot marker matched.
    UnknownSlot { konami_id: u32 },
    /// No identity, but the key is a known fixture and can be ignored.
    Noise,
}

/// Resolve the owning character and slot of a character-asset key.
///
/// A key without an identity is an error unless it is a known fixture.
pub fn resolve(path: &str) -> Result<Resolution, AssetError> {
    let Some(konami_id) = extract_identity(path) else {
        if is_noise(path) {
            return Ok(Resolution::Noise);
        }
        return Err(AssetError::classification_miss(path));
    };

    Ok(match resolve_slot(path) {
        Some(slot) => Resolution::Asset { konami_id, slot },
        None => Resolution::UnknownSlot { konami_id },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_every_slot_once() {
        assert_eq!(DECLARED.len(), 88);
        assert_eq!(MATCH_ORDER.len(), DECLARED.len());
        for slot in DECLARED {
            assert_eq!(
                MATCH_ORDER.iter().filter(|s| *s == slot).count(),
                1,
                "{slot:?} must appear exactly once in match order"
            );
        }
    }

    #[test]
    fn longer_markers_are_tried_first() {
        for (i, earlier) in MATCH_ORDER.iter().enumerate() {
            for later in &MATCH_ORDER[i + 1..] {
                assert!(
                    !later.marker().contains(earlier.marker()),
                    "{} shadows {}",
                    earlier.marker(),
                    later.marker()
                );
            }
        }
    }

    #[test]
    fn resolves_two_digit_variants() {
        let key = "assets/resourcesassetbundle/chara/sn0411/chara003_12.png";
        assert_eq!(resolve_slot(key), Some(CharaSlot::Duel12));
        let key = "assets/resourcesassetbundle/chara/sn0411/chara003_1.png";
        assert_eq!(resolve_slot(key), Some(CharaSlot::Duel1));
        let key = "assets/chara/sn0100/chara004_1.png";
        assert_eq!(resolve_slot(key), Some(CharaSlot::Event));
        let key = "assets/chara/sn0100/chara004.png";
        assert_eq!(resolve_slot(key), Some(CharaSlot::World));
    }

    #[test]
    fn resolves_name_plates_and_cutins() {
        assert_eq!(
            resolve_slot("assets/chara/sn0100/charaname002.png"),
            Some(CharaSlot::NameSmall)
        );
        assert_eq!(
            resolve_slot("assets/chara/sn0100/cutin003.png"),
            Some(CharaSlot::Defeat)
        );
        assert_eq!(
            resolve_slot("assets/chara/sn0100/vs001.png"),
            Some(CharaSlot::Versus)
        );
        assert_eq!(resolve_slot("assets/chara/sn0100/readme.txt"), None);
    }

    #[test]
    fn identity_extraction() {
        assert_eq!(extract_identity("assets/chara/sn0411/chara001.png"), Some(411));
        assert_eq!(extract_identity("assets/chara/SN9001/chara001.png"), Some(9001));
        assert_eq!(extract_identity("assets/chara/common/chara001.png"), None);
        assert_eq!(extract_identity("assets/chara/sn12/chara001.png"), None);
    }

    #[test]
    fn character_gate() {
        assert!(is_character_asset("assets/chara/sn0411/chara001.png"));
        assert!(is_character_asset("assets/chara/sn0411/Chara003_12.png"));
        assert!(is_character_asset("assets/chara/sn0411/charaname001.png"));
        assert!(is_character_asset("assets/chara/sn0411/cutin002.png"));
        assert!(is_character_asset("assets/chara/sn0411/vs001.png"));
        assert!(!is_character_asset("assets/chara/sn0411/chara01.png"));
        assert!(!is_character_asset("assets/ui/background.png"));
    }

    #[test]
    fn missing_identity_is_an_error() {
        let err = resolve("assets/chara/common/chara001.png").unwrap_err();
        assert!(matches!(err, AssetError::ClassificationMiss { .. }));
        assert!(err.to_string().contains("assets/chara/common/chara001.png"));
    }

    #[test]
    fn missing_identity_in_fixture_is_noise() {
        assert_eq!(
            resolve("assets/chara/dummy/chara001.png").unwrap(),
            Resolution::Noise
        );
        assert_eq!(
            resolve("assets/chara/Test/cutin001.png").unwrap(),
            Resolution::Noise
        );
    }

    #[test]
    fn resolve_full() {
        assert_eq!(
            resolve("assets/chara/sn0100/chara002.png").unwrap(),
            Resolution::Asset {
                konami_id: 100,
                slot: CharaSlot::Select
            }
        );
        assert_eq!(
            resolve("assets/chara/sn0100/vs002.png").unwrap(),
            Resolution::UnknownSlot { konami_id: 100 }
        );
    }

    #[test]
    fn new_record_classifies_series() {
        let record = CharacterRecord::new(411);
        assert_eq!(record.series, Series::Zexal);
        assert!(record.assets.is_empty());
    }

    #[test]
    fn fill_missing_keeps_existing_values() {
        let mut first = CharacterRecord::new(100).with_asset(CharaSlot::Icon, "bundleA");
        let second = CharacterRecord::new(100)
            .with_asset(CharaSlot::Icon, "bundleB")
            .with_asset(CharaSlot::Select, "bundleC");

        assert_eq!(first.fill_missing_from(&second), 1);
        assert_eq!(first.get(CharaSlot::Icon), Some("bundleA"));
        assert_eq!(first.get(CharaSlot::Select), Some("bundleC"));
    }

    #[test]
    fn record_serializes_flat() {
        let record = CharacterRecord::new(411)
            .with_asset(CharaSlot::Icon, "ab12cd")
            .with_asset(CharaSlot::Duel10, "ef34gh");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["konami_id"], 411);
        assert_eq!(json["series"], "ZEXAL");
        assert_eq!(json["icon"], "ab12cd");
        assert_eq!(json["duel_10"], "ef34gh");

        let back: CharacterRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
