//! Data model and pure classification logic for game-asset extraction.
//!
//! Nothing here touches the filesystem beyond the [`ManifestReader`]
//! container adapter; scanning and merging live in `duel-etl-lib`.

pub mod character;
pub mod classify;
pub mod container;
pub mod dataset;
pub mod error;
pub mod metadata;
pub mod series;

pub use character::{
    CharaSlot, CharacterRecord, Resolution, extract_identity, is_character_asset, is_noise,
    resolve, resolve_slot,
};
pub use classify::{Classification, ImageCategory, ImageSlot, classify};
pub use container::{ContainerEntry, ContainerReader, ManifestReader, MemoryReader};
pub use dataset::{
    Dataset, ImageCollection, ImageSlots, PartialResultSet, ReconciledCard, ReconciledDataset,
};
pub use error::AssetError;
pub use metadata::CardMetadata;
pub use series::{Series, classify_series};
