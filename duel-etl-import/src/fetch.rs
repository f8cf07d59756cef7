//! Fetch-or-reuse step for card display metadata.

use duel_etl_db::{OperationError, card_count, insert_fetch_log, upsert_cards};
use duel_etl_provider::{CardMetadataProvider, ProviderError};
use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to get card data from provider: {0}")]
    Provider(#[from] ProviderError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
}

/// What [`ensure_card_metadata`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The cache already held this many cards; nothing was fetched.
    Cached(usize),
    /// This many cards were fetched and stored.
    Fetched(usize),
}

/// Make sure the cache holds card metadata, fetching it once if empty.
///
/// A non-empty cache is reused as is. Otherwise the provider's full list is
/// stored in one transaction and the fetch is logged. Provider failures are
/// returned unchanged; there is no retry.
pub async fn ensure_card_metadata<P: CardMetadataProvider>(
    conn: &Connection,
    provider: &P,
) -> Result<FetchOutcome, FetchError> {
    // COUNT(*) is never negative
    let cached = usize::try_from(card_count(conn)?).unwrap_or_default();
    if cached > 0 {
        log::info!("Using {} cached cards", cached);
        return Ok(FetchOutcome::Cached(cached));
    }

    log::info!("Card cache empty, fetching from {}", provider.source());
    let cards = provider.lookup_all().await?;
    let stored = upsert_cards(conn, &cards)?;
    insert_fetch_log(conn, provider.source(), stored)?;
    log::info!("Stored {} cards from {}", stored, provider.source());

    Ok(FetchOutcome::Fetched(stored))
}
