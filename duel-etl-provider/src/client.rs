use std::sync::Arc;

use duel_etl_core::CardMetadata;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::error::ProviderError;
use crate::types::{parse_card_info, truncate};

pub const BASE_URL: &str = "https://db.ygoprodeck.com/api/v7";
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A source of card display metadata.
#[allow(async_fn_in_trait)]
pub trait CardMetadataProvider {
    /// Short name recorded in the cache's fetch log.
    fn source(&self) -> &str;

    /// Fetch metadata for every card the provider knows.
    async fn lookup_all(&self) -> Result<Vec<CardMetadata>, ProviderError>;
}

/// HTTP client for the YGOPRODeck card database API with rate limiting.
pub struct YgoProClient {
    http: reqwest::Client,
    base_url: String,
    last_request: Arc<Mutex<Instant>>,
}

impl YgoProClient {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(BASE_URL)
    }

    /// Client against a different API root (mirrors, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            last_request: Arc::new(Mutex::new(Instant::now() - MIN_REQUEST_INTERVAL)),
        })
    }

    /// Fetch the full OCG card list with Konami identities.
    pub async fn fetch_all(&self) -> Result<Vec<CardMetadata>, ProviderError> {
        self.rate_limit().await;

        let resp = self
            .http
            .get(format!("{}/cardinfo.php", self.base_url))
            .query(&[("format", "OCG"), ("misc", "Yes")])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: truncate(&text, 500).to_string(),
            });
        }

        let cards = parse_card_info(&text)?;
        log::debug!("Provider returned {} cards with identities", cards.len());
        Ok(cards)
    }

    /// Enforce rate limiting: wait until at least MIN_REQUEST_INTERVAL has
    /// passed since the last API request.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < MIN_REQUEST_INTERVAL {
            tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
        }
        *last = Instant::now();
    }
}

impl CardMetadataProvider for YgoProClient {
    fn source(&self) -> &str {
        "ygoprodeck"
    }

    async fn lookup_all(&self) -> Result<Vec<CardMetadata>, ProviderError> {
        self.fetch_all().await
    }
}
