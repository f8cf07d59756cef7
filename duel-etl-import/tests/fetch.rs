use std::sync::atomic::{AtomicUsize, Ordering};

use duel_etl_core::CardMetadata;
use duel_etl_db::{card_count, find_card, last_fetch, open_memory, upsert_card};
use duel_etl_import::{FetchError, FetchOutcome, ensure_card_metadata};
use duel_etl_provider::{CardMetadataProvider, ProviderError};

struct FakeProvider {
    cards: Vec<CardMetadata>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeProvider {
    fn with_cards(cards: Vec<CardMetadata>) -> Self {
        Self {
            cards,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            cards: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

impl CardMetadataProvider for FakeProvider {
    fn source(&self) -> &str {
        "fake"
    }

    async fn lookup_all(&self) -> Result<Vec<CardMetadata>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::Status {
                status: 503,
                message: "maintenance".to_string(),
            });
        }
        Ok(self.cards.clone())
    }
}

#[tokio::test]
async fn empty_cache_fetches_and_stores() {
    let conn = open_memory().unwrap();
    let provider = FakeProvider::with_cards(vec![
        CardMetadata::new(4064, "Kuriboh", "effect"),
        CardMetadata::new(4007, "Blue-Eyes White Dragon", "normal"),
    ]);

    let outcome = ensure_card_metadata(&conn, &provider).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Fetched(2));
    assert_eq!(card_count(&conn).unwrap(), 2);
    assert_eq!(find_card(&conn, 4064).unwrap().unwrap().name, "Kuriboh");

    let log = last_fetch(&conn).unwrap().unwrap();
    assert_eq!(log.source, "fake");
    assert_eq!(log.card_count, 2);
}

#[tokio::test]
async fn populated_cache_skips_provider() {
    let conn = open_memory().unwrap();
    upsert_card(&conn, &CardMetadata::new(1, "Cached", "normal")).unwrap();
    let provider = FakeProvider::with_cards(vec![CardMetadata::new(2, "Fresh", "normal")]);

    let outcome = ensure_card_metadata(&conn, &provider).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Cached(1));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    assert!(find_card(&conn, 2).unwrap().is_none());
}

#[tokio::test]
async fn provider_failure_is_fatal_and_reported() {
    let conn = open_memory().unwrap();
    let provider = FakeProvider::failing();

    let err = ensure_card_metadata(&conn, &provider).await.unwrap_err();
    assert!(matches!(err, FetchError::Provider(_)));
    let message = err.to_string();
    assert!(message.contains("503"));
    assert!(message.contains("maintenance"));
    assert_eq!(card_count(&conn).unwrap(), 0);
    assert!(last_fetch(&conn).unwrap().is_none());
}
