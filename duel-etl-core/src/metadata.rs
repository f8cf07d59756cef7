use serde::{Deserialize, Serialize};

/// Display metadata for one card, as supplied by the remote provider and
/// kept in the local cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMetadata {
    pub konami_id: u32,
    pub name: String,
    /// Card frame category (`normal`, `effect`, `xyz`, ...).
    pub frame_type: String,
}

impl CardMetadata {
    pub fn new(konami_id: u32, name: impl Into<String>, frame_type: impl Into<String>) -> Self {
        Self {
            konami_id,
            name: name.into(),
            frame_type: frame_type.into(),
        }
    }
}
