// src/services/fetcher.rs

//! Paginated catalog fetcher.
//!
//! Drains a collection endpoint by following the `next` cursor of each page
//! until it is null, tagging every item with its owning category.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Category, Config, Item, PageEnvelope};
use crate::services::cache::CatalogSource;

/// Transport for fetching a single catalog page.
#[async_trait]
pub trait PageTransport: Send + Sync {
    /// Fetch and decode one page. Fails on transport errors and on
    /// non-success statuses.
    async fn fetch_page(&self, url: &str) -> Result<PageEnvelope>;
}

/// HTTP transport backed by a configured reqwest client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport from the catalog configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.catalog.user_agent)
            .timeout(Duration::from_secs(config.catalog.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageTransport for HttpTransport {
    async fn fetch_page(&self, url: &str) -> Result<PageEnvelope> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::status(status, url));
        }
        Ok(response.json().await?)
    }
}

/// Fetcher that fully drains paginated collection endpoints.
pub struct CatalogFetcher {
    config: Arc<Config>,
    transport: Arc<dyn PageTransport>,
}

impl CatalogFetcher {
    /// Create a fetcher with an HTTP transport built from the configuration.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a fetcher over a custom transport.
    pub fn with_transport(config: Arc<Config>, transport: Arc<dyn PageTransport>) -> Self {
        Self { config, transport }
    }

    /// Fetch every page of a category into one ordered sequence.
    ///
    /// Pages are requested strictly sequentially (each request depends on
    /// the previous page's cursor) with a fixed courtesy delay between
    /// them. Any page failure aborts the whole fetch; no partial result is
    /// returned.
    pub async fn fetch_all(&self, category: Category) -> Result<Vec<Item>> {
        let delay = Duration::from_millis(self.config.catalog.request_delay_ms);
        let mut items = Vec::new();
        let mut next_url = Some(self.config.catalog.endpoint_url(category));
        let mut page_count = 0usize;
        let mut expected = 0usize;

        while let Some(url) = next_url {
            page_count += 1;
            let page = self.transport.fetch_page(&url).await?;
            log::debug!(
                "{category}: page {page_count} returned {} items",
                page.results.len()
            );

            expected = page.count;
            items.extend(
                page.results
                    .into_iter()
                    .map(|fields| Item::new(category, fields)),
            );

            next_url = page.next;
            if next_url.is_some() && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        if items.len() != expected {
            log::warn!(
                "{category}: drained {} items but upstream reported {expected}",
                items.len()
            );
        }
        log::info!(
            "{category}: loaded {} items across {page_count} pages",
            items.len()
        );

        Ok(items)
    }
}

#[async_trait]
impl CatalogSource for CatalogFetcher {
    async fn fetch_all(&self, category: Category) -> Result<Vec<Item>> {
        CatalogFetcher::fetch_all(self, category).await
    }
}
