//! Remote card metadata provider (YGOPRODeck).

pub mod client;
pub mod error;
pub mod types;

pub use client::{BASE_URL, CardMetadataProvider, YgoProClient};
pub use error::ProviderError;
pub use types::{CardInfo, parse_card_info};
