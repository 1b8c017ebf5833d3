use crate::domain::model::{Card, Set, SetCards, SetList};
use crate::domain::ports::{CatalogClient, ConfigProvider};
use crate::utils::error::{MtgaError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

pub const DEFAULT_HOST: &str = "https://api.magicthegathering.io";
pub const SETS_PATH: &str = "/v1/sets";
pub const CARDS_PATH: &str = "/v1/cards";
/// The catalog silently clamps larger `pageSize` values to this.
pub const MAX_PAGE_SIZE: usize = 100;

/// Client for the magicthegathering.io REST API.
pub struct MtgIoClient {
    client: Client,
    host: String,
    page_size: usize,
    max_pages: usize,
}

impl MtgIoClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("mtga/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            host: config.api_host().trim_end_matches('/').to_string(),
            page_size: config.page_size(),
            max_pages: config.max_pages(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.host, path);
        tracing::debug!("Making API request to: {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(MtgaError::CatalogStatusError {
                status: response.status().as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| MtgaError::CatalogDecodeError { url, source })
    }
}

#[async_trait]
impl CatalogClient for MtgIoClient {
    async fn fetch_sets(&self) -> Result<Vec<Set>> {
        tracing::info!("Fetching set list from {}", self.host);
        let list: SetList = self.get_json(SETS_PATH, &[]).await?;
        tracing::info!("Catalog returned {} sets", list.sets.len());
        Ok(list.sets)
    }

    async fn fetch_set_cards(&self, set_code: &str) -> Result<SetCards> {
        tracing::info!("Fetching cards for set {} from {}", set_code, self.host);

        let mut cards: Vec<Card> = Vec::new();
        for page in 1..=self.max_pages {
            let query = [
                ("set", set_code.to_string()),
                ("page", page.to_string()),
                ("pageSize", self.page_size.to_string()),
            ];
            let batch: SetCards = self.get_json(CARDS_PATH, &query).await?;
            let received = batch.cards.len();
            tracing::debug!("Page {} of set {}: {} cards", page, set_code, received);
            cards.extend(batch.cards);

            if received < self.page_size {
                break;
            }
            if page == self.max_pages {
                tracing::warn!(
                    "Stopped after {} pages for set {}; raise catalog.max_pages to read more",
                    self.max_pages,
                    set_code
                );
            }
        }

        tracing::info!("Catalog returned {} cards for set {}", cards.len(), set_code);
        Ok(SetCards::new(cards))
    }
}
