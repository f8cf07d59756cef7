use serde::{Deserialize, Serialize};

/// Character series, derived from the numeric identity encoded in asset paths.
///
/// Each playable series owns a block of 100 identities starting at its base
/// (e.g. `sn0411` is ZEXAL because 411 falls in 400..500). Everything outside
/// the playable blocks is a non-playable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Series {
    Dm,
    Gx,
    #[serde(rename = "FDS")]
    FiveDs,
    Dsod,
    Zexal,
    #[serde(rename = "ARC_V")]
    ArcV,
    Vrains,
    Sevens,
    Standard,
    Rush,
    NonPlayable,
}

/// Width of every playable identity block.
pub const SERIES_WIDTH: u32 = 100;

/// Start of the identity range conventionally used for non-playable entities.
pub const NON_PLAYABLE_BASE: u32 = 9000;

/// Playable series in ascending range order. Classification scans this list
/// front to back; the catch-all is not part of it.
const RANGED_SERIES: &[Series] = &[
    Series::Dm,
    Series::Gx,
    Series::FiveDs,
    Series::Dsod,
    Series::Zexal,
    Series::ArcV,
    Series::Vrains,
    Series::Sevens,
    Series::Standard,
    Series::Rush,
];

impl Series {
    /// First identity of this series' range.
    pub fn base(&self) -> u32 {
        match self {
            Self::Dm => 0,
            Self::Gx => 100,
            Self::FiveDs => 200,
            Self::Dsod => 300,
            Self::Zexal => 400,
            Self::ArcV => 500,
            Self::Vrains => 600,
            Self::Sevens => 700,
            Self::Standard => 800,
            Self::Rush => 900,
            Self::NonPlayable => NON_PLAYABLE_BASE,
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dm => "DM",
            Self::Gx => "GX",
            Self::FiveDs => "5D's",
            Self::Dsod => "DSOD",
            Self::Zexal => "ZEXAL",
            Self::ArcV => "ARC-V",
            Self::Vrains => "VRAINS",
            Self::Sevens => "SEVENS",
            Self::Standard => "Standard",
            Self::Rush => "Rush",
            Self::NonPlayable => "Non-playable",
        }
    }

    /// Whether `identity` belongs to this series.
    ///
    /// Playable series cover a half-open range; the catch-all takes every
    /// identity no playable range claims.
    pub fn contains(&self, identity: u32) -> bool {
        match self {
            Self::NonPlayable => !RANGED_SERIES.iter().any(|s| s.contains(identity)),
            _ => self.base() <= identity && identity < self.base() + SERIES_WIDTH,
        }
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classify a character identity into its series.
///
/// Ranges are checked in ascending order and the first match wins. Anything
/// that no playable range claims falls into [`Series::NonPlayable`].
pub fn classify_series(identity: u32) -> Series {
    RANGED_SERIES
        .iter()
        .copied()
        .find(|series| series.contains(identity))
        .unwrap_or(Series::NonPlayable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classified_series_contains_identity() {
        for id in [0, 99, 100, 450, 999, 1000, 1500, 8999, 9000, 9500] {
            let series = classify_series(id);
            assert!(series.contains(id), "{id} classified as {series:?}");
            for other in RANGED_SERIES.iter().filter(|s| **s != series) {
                assert!(!other.contains(id), "{id} also in {other:?}");
            }
        }
    }

    #[test]
    fn mid_range_identity() {
        assert_eq!(classify_series(450), Series::Zexal);
        assert_eq!(classify_series(411), Series::Zexal);
    }

    #[test]
    fn boundary_belongs_to_next_range() {
        assert_eq!(classify_series(499), Series::Zexal);
        assert_eq!(classify_series(500), Series::ArcV);
        assert_eq!(classify_series(0), Series::Dm);
        assert_eq!(classify_series(999), Series::Rush);
    }

    #[test]
    fn catch_all_for_everything_else() {
        assert_eq!(classify_series(9500), Series::NonPlayable);
        assert_eq!(classify_series(9000), Series::NonPlayable);
        assert_eq!(classify_series(1000), Series::NonPlayable);
        assert_eq!(classify_series(4321), Series::NonPlayable);
    }

    #[test]
    fn ranges_are_ascending_and_contiguous() {
        let bases: Vec<u32> = RANGED_SERIES.iter().map(|s| s.base()).collect();
        for pair in bases.windows(2) {
            assert_eq!(pair[1], pair[0] + SERIES_WIDTH);
        }
    }

    #[test]
    fn serializes_like_checkpoint_format() {
        let json = serde_json::to_string(&Series::ArcV).unwrap();
        assert_eq!(json, "\"ARC_V\"");
        let json = serde_json::to_string(&Series::NonPlayable).unwrap();
        assert_eq!(json, "\"NON_PLAYABLE\"");
        let json = serde_json::to_string(&Series::FiveDs).unwrap();
        assert_eq!(json, "\"FDS\"");
    }
}
