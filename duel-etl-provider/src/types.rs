use duel_etl_core::CardMetadata;
use serde::Deserialize;

use crate::error::ProviderError;

/// Top-level response from `cardinfo.php`.
#[derive(Debug, Deserialize)]
pub struct CardInfoResponse {
    #[serde(default)]
    pub data: Vec<CardInfo>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardInfo {
    pub name: String,
    #[serde(rename = "frameType", default)]
    pub frame_type: String,
    /// Present when the request asks for `misc=Yes`.
    #[serde(default)]
    pub misc_info: Vec<MiscInfo>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MiscInfo {
    #[serde(default)]
    pub konami_id: Option<u32>,
}

impl CardInfo {
    /// Identity from the first `misc_info` entry, if present.
    pub fn konami_id(&self) -> Option<u32> {
        self.misc_info.first().and_then(|m| m.konami_id)
    }

    /// Convert to cache metadata. Cards without an identity are dropped.
    pub fn into_metadata(self) -> Option<CardMetadata> {
        let konami_id = self.konami_id()?;
        Some(CardMetadata {
            konami_id,
            name: self.name,
            frame_type: self.frame_type,
        })
    }
}

/// Parse a `cardinfo.php` body into cache metadata.
pub fn parse_card_info(text: &str) -> Result<Vec<CardMetadata>, ProviderError> {
    let response: CardInfoResponse = serde_json::from_str(text).map_err(|e| {
        ProviderError::Api(format!(
            "Failed to parse card info: {e}. Response: {}",
            truncate(text, 200)
        ))
    })?;
    Ok(response
        .data
        .into_iter()
        .filter_map(CardInfo::into_metadata)
        .collect())
}

pub(crate) fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}
